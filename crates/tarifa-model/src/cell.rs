//! Normalized spreadsheet cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A spreadsheet cell after normalization.
///
/// `Empty` is a valid "no value" state, never an error: blank cells,
/// `N/A` markers and unparseable numbers all land here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value, or zero when the cell holds no number.
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(value) => write!(f, "{}", format_amount(*value)),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Formats an amount the way it appears in contract text: integral values
/// carry no decimal part, fractional values keep their shortest form.
pub fn format_amount(value: f64) -> String {
    if value == 0.0 {
        // Avoids rendering negative zero as "-0".
        return "0".to_string();
    }
    format!("{value}")
}
