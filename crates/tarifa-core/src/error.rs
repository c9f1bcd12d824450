//! Error types for selection operations.

use thiserror::Error;

/// Rejected selection operations. A rejected operation leaves the state
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown section '{section}'")]
    UnknownSection { section: String },

    #[error("unknown subsection '{subsection}' in section '{section}'")]
    UnknownSubsection { section: String, subsection: String },

    /// The additional-line limit of the structure entry is reached.
    #[error("{section}/{subsection} already has {max} additional lines")]
    LineLimitReached {
        section: String,
        subsection: String,
        max: usize,
    },

    #[error("the primary line of {section}/{subsection} cannot be removed")]
    PrimaryLineRemoval { section: String, subsection: String },

    #[error("{section}/{subsection} has no line {line}")]
    LineOutOfRange {
        section: String,
        subsection: String,
        line: usize,
    },

    /// A line operation on a single selector, or a toggle on a multi-line one.
    #[error("{section}/{subsection} does not support {operation}")]
    Unsupported {
        section: String,
        subsection: String,
        operation: &'static str,
    },

    #[error("unknown toggle option '{key}' in {section}/{subsection}")]
    UnknownToggle {
        section: String,
        subsection: String,
        key: String,
    },

    /// Fixed-line portability needs a selected plan with `FIJO` in its name.
    #[error("portability is not available for the plan selected in {section}/{subsection}")]
    PortabilityUnavailable { section: String, subsection: String },
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Delivery failure reported by a [`SubmissionSink`](crate::SubmissionSink).
#[derive(Debug, Error)]
#[error("submission sink failed: {0}")]
pub struct SinkError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_error_names_the_subsection() {
        let err = SelectionError::LineLimitReached {
            section: "Movil".into(),
            subsection: "nuevo".into(),
            max: 4,
        };
        assert_eq!(err.to_string(), "Movil/nuevo already has 4 additional lines");
    }
}
