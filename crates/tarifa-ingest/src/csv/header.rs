use std::collections::BTreeMap;

/// Trims a header cell, drops a BOM and collapses inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A logical column and the header spellings that feed it.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAliases {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl ColumnAliases {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }
}

/// Case-insensitive lookup from header text to column positions.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: BTreeMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(headers: &[String]) -> Self {
        let mut positions = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            positions
                .entry(normalize_header(header).to_lowercase())
                .or_insert(idx);
        }
        Self { positions }
    }

    /// Column positions for every alias present, in alias order.
    pub fn columns(&self, column: &ColumnAliases) -> Vec<usize> {
        column
            .aliases
            .iter()
            .filter_map(|alias| self.positions.get(&alias.to_lowercase()).copied())
            .collect()
    }

    pub fn has(&self, column: &ColumnAliases) -> bool {
        !self.columns(column).is_empty()
    }

    /// First non-empty value among the alias columns of `row`.
    pub fn value<'a>(&self, row: &'a [String], column: &ColumnAliases) -> &'a str {
        self.columns(column)
            .into_iter()
            .filter_map(|idx| row.get(idx))
            .map(String::as_str)
            .find(|value| !value.trim().is_empty())
            .unwrap_or("")
    }
}
