//! Indexed catalog and selector option listing.

use std::collections::BTreeMap;

use tarifa_model::{CatalogRow, LineMode};
use tracing::debug;

use crate::prefix::matches_any_prefix;
use crate::selection::{Selection, SubsectionState};

/// Loaded catalog rows with a code index. Codes are unique: a code repeated
/// in the input keeps its first row.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
    by_code: BTreeMap<String, usize>,
}

impl Catalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        let mut unique = Vec::with_capacity(rows.len());
        let mut by_code = BTreeMap::new();
        for row in rows {
            if by_code.contains_key(&row.code) {
                debug!(code = %row.code, "duplicate catalog code dropped");
                continue;
            }
            by_code.insert(row.code.clone(), unique.len());
            unique.push(row);
        }
        Self {
            rows: unique,
            by_code,
        }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find_by_code(&self, code: &str) -> Option<&CatalogRow> {
        if code.is_empty() {
            return None;
        }
        self.by_code.get(code).map(|&idx| &self.rows[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.find_by_code(code).is_some()
    }

    /// Rows matching any of `prefixes`, in catalog order.
    pub fn filter_by_prefixes<S: AsRef<str>>(&self, prefixes: &[S]) -> Vec<&CatalogRow> {
        if prefixes.is_empty() {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter(|row| matches_any_prefix(&row.code, prefixes))
            .collect()
    }

    /// Selectable rows of each selector of a subsection, in selector order.
    ///
    /// Additional mobile lines in `multi` mode also offer the extra-mapping
    /// target of the code selected on the primary line.
    pub fn options_for(&self, subsection: &SubsectionState) -> Vec<Vec<&CatalogRow>> {
        let prefixes = subsection.selector_prefixes();
        let extra = self.extra_option(subsection);
        prefixes
            .iter()
            .enumerate()
            .map(|(line, prefixes)| {
                let mut options = self.filter_by_prefixes(prefixes);
                let offers_extra = match &subsection.selection {
                    Selection::Lines { lines } => {
                        line > 0 && lines.get(line).is_some_and(|l| l.mode == LineMode::Multi)
                    }
                    Selection::Single { .. } => false,
                };
                if offers_extra
                    && let Some(row) = extra
                    && !options.iter().any(|option| option.code == row.code)
                {
                    options.push(row);
                }
                options
            })
            .collect()
    }

    fn extra_option(&self, subsection: &SubsectionState) -> Option<&CatalogRow> {
        let primary = subsection.selection.code_at(0)?;
        let target = subsection.entry.extra_mapping.get(primary)?;
        self.find_by_code(target)
    }
}

#[cfg(test)]
mod tests {
    use tarifa_model::{ComponentType, StructureEntry};

    use super::*;
    use crate::selection::SelectionState;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogRow::new("NM01", "Plan A"),
            CatalogRow::new("NM02", "Plan B"),
            CatalogRow::new("ND01", "Datos"),
            CatalogRow::new("XNM02", "Plan B adicional"),
            CatalogRow::new("NM01", "Plan A duplicado"),
        ])
    }

    fn movil_state() -> SelectionState {
        let mut entry = StructureEntry::new("Movil", "nuevo", ComponentType::MovilGroup);
        entry.multi_prefixes.insert("multi".into(), "NM".into());
        entry.multi_prefixes.insert("datos".into(), "ND".into());
        entry.extra_mapping.insert("NM02".into(), "XNM02".into());
        entry.max_additional_lines = 3;
        SelectionState::from_structure(&[entry])
    }

    #[test]
    fn first_row_wins_on_duplicate_codes() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.find_by_code("NM01").unwrap().plan_name, "Plan A");
        assert!(catalog.find_by_code("").is_none());
        assert!(!catalog.contains("ZZ"));
    }

    #[test]
    fn additional_multi_lines_offer_the_extra_plan() {
        let catalog = catalog();
        let mut state = movil_state();
        state.add_line("Movil", "nuevo").unwrap();
        state.add_line("Movil", "nuevo").unwrap();
        state.switch_line_mode("Movil", "nuevo", 2, LineMode::Datos).unwrap();

        let sub = state.subsection("Movil", "nuevo").unwrap();
        let options = catalog.options_for(sub);
        assert_eq!(options[1].len(), 2);

        state.select_row("Movil", "nuevo", 0, "NM02").unwrap();
        let sub = state.subsection("Movil", "nuevo").unwrap();
        let options = catalog.options_for(sub);
        let codes = |idx: usize| options[idx].iter().map(|r| r.code.as_str()).collect::<Vec<_>>();
        assert_eq!(codes(0), vec!["NM01", "NM02"]);
        assert_eq!(codes(1), vec!["NM01", "NM02", "XNM02"]);
        assert_eq!(codes(2), vec!["ND01"]);
    }
}
