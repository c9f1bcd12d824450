//! CSV sheet reading utilities.

mod header;
mod reader;

pub use header::{ColumnAliases, HeaderIndex, normalize_header};
pub use reader::{SheetTable, read_sheet, read_sheet_from_reader};
