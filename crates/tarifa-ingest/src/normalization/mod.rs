//! Normalization of raw spreadsheet cells.

pub mod numeric;

pub use numeric::{NOT_APPLICABLE_TOKENS, normalize_number, renormalize};
