use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use super::header::normalize_header;
use crate::error::{IngestError, Result};

/// A sheet read from CSV: normalized headers plus rows padded to the header
/// width.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub fn read_sheet(path: &Path) -> Result<SheetTable> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    read_sheet_from_reader(file, path)
}

/// Reads a sheet from any reader; `path` is only used in errors.
pub fn read_sheet_from_reader<R: Read>(input: R, path: &Path) -> Result<SheetTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        records.push(row);
    }

    let mut records = records.into_iter();
    let Some(header_row) = records.next() else {
        return Ok(SheetTable {
            path: path.to_path_buf(),
            ..SheetTable::default()
        });
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(String::as_str)
        .map(normalize_header)
        .collect();
    let rows = records
        .map(|record| {
            (0..headers.len())
                .map(|idx| record.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    Ok(SheetTable {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}
