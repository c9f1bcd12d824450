//! Session files: a contract form plus the selection actions an agent took.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tarifa_core::{SelectionError, Session};
use tarifa_model::{ContractForm, HomeKind, LineMode, Portability};
use tracing::warn;

/// Contents of a `--session` JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionFile {
    pub form: ContractForm,
    pub actions: Vec<SessionAction>,
}

/// One selection operation, replayed in file order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    SelectSection {
        section: String,
    },
    SelectSubsection {
        section: String,
        subsection: String,
    },
    SelectHomeKind {
        section: String,
        subsection: String,
        kind: HomeKind,
    },
    SelectToggle {
        section: String,
        subsection: String,
        key: String,
    },
    SelectLineMode {
        section: String,
        subsection: String,
        line: usize,
        mode: LineMode,
    },
    SelectRow {
        section: String,
        subsection: String,
        #[serde(default)]
        line: usize,
        code: String,
    },
    AddLine {
        section: String,
        subsection: String,
    },
    RemoveLine {
        section: String,
        subsection: String,
        line: usize,
    },
    SetPortability {
        section: String,
        subsection: String,
        #[serde(default)]
        line: usize,
        #[serde(default)]
        requested: bool,
        #[serde(default)]
        number: String,
        #[serde(default)]
        donor: String,
    },
}

impl SessionAction {
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::SelectSection { .. } => "select_section",
            SessionAction::SelectSubsection { .. } => "select_subsection",
            SessionAction::SelectHomeKind { .. } => "select_home_kind",
            SessionAction::SelectToggle { .. } => "select_toggle",
            SessionAction::SelectLineMode { .. } => "select_line_mode",
            SessionAction::SelectRow { .. } => "select_row",
            SessionAction::AddLine { .. } => "add_line",
            SessionAction::RemoveLine { .. } => "remove_line",
            SessionAction::SetPortability { .. } => "set_portability",
        }
    }

    fn apply(&self, session: &mut Session) -> tarifa_core::Result<()> {
        match self {
            SessionAction::SelectSection { section } => session.switch_active_section(section),
            SessionAction::SelectSubsection {
                section,
                subsection,
            } => session.switch_active_subsection(section, subsection),
            SessionAction::SelectHomeKind {
                section,
                subsection,
                kind,
            } => session.switch_home_kind(section, subsection, *kind),
            SessionAction::SelectToggle {
                section,
                subsection,
                key,
            } => session.switch_toggle(section, subsection, key),
            SessionAction::SelectLineMode {
                section,
                subsection,
                line,
                mode,
            } => session.switch_line_mode(section, subsection, *line, *mode),
            SessionAction::SelectRow {
                section,
                subsection,
                line,
                code,
            } => session.select_row(section, subsection, *line, code),
            SessionAction::AddLine {
                section,
                subsection,
            } => session.add_line(section, subsection).map(|_| ()),
            SessionAction::RemoveLine {
                section,
                subsection,
                line,
            } => session.remove_line(section, subsection, *line),
            SessionAction::SetPortability {
                section,
                subsection,
                line,
                requested,
                number,
                donor,
            } => session.set_portability(
                section,
                subsection,
                *line,
                Portability::new(*requested, number.as_str(), donor.as_str()),
            ),
        }
    }
}

/// An action the session refused. Replay continues after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAction {
    /// Position in the `actions` list.
    pub index: usize,
    pub action: &'static str,
    pub error: SelectionError,
}

pub fn load_session_file(path: &Path) -> Result<SessionFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read session file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse session file {}", path.display()))
}

/// Applies `actions` in order and returns the rejected ones.
pub fn replay(session: &mut Session, actions: &[SessionAction]) -> Vec<RejectedAction> {
    let mut rejected = Vec::new();
    for (index, action) in actions.iter().enumerate() {
        if let Err(error) = action.apply(session) {
            warn!(index, action = action.name(), %error, "session action rejected");
            rejected.push(RejectedAction {
                index,
                action: action.name(),
                error,
            });
        }
    }
    rejected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse_from_tagged_json() {
        let file: SessionFile = serde_json::from_str(
            r#"{
                "form": {"titular": "Juan", "pickup": "Domicilio"},
                "actions": [
                    {"action": "select_section", "section": "Movil"},
                    {"action": "select_row", "section": "Movil", "subsection": "nuevo", "code": "NM01"},
                    {"action": "select_line_mode", "section": "Movil", "subsection": "nuevo", "line": 1, "mode": "datos"},
                    {"action": "set_portability", "section": "Hogar", "subsection": "nuevo", "requested": true, "number": "22", "donor": "VTR"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(file.form.titular, "Juan");
        assert_eq!(file.actions.len(), 4);
        assert_eq!(
            file.actions[1],
            SessionAction::SelectRow {
                section: "Movil".into(),
                subsection: "nuevo".into(),
                line: 0,
                code: "NM01".into(),
            }
        );
        assert_eq!(file.actions[2].name(), "select_line_mode");
    }

    #[test]
    fn unknown_action_is_a_parse_error() {
        let result = serde_json::from_str::<SessionFile>(r#"{"actions": [{"action": "teleport"}]}"#);
        assert!(result.is_err());
    }
}
