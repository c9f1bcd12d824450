//! Selection state tree.
//!
//! One [`SectionState`] per structure section, one [`SubsectionState`] per
//! structure row. The tree holds plain values only and is mutated through the
//! named operations on [`SelectionState`]; every operation either applies
//! fully or returns a [`SelectionError`] and leaves the tree untouched.

use serde::{Deserialize, Serialize};
use tarifa_model::{ComponentType, HomeKind, LineMode, Portability, StructureEntry, ToggleOption};
use tracing::debug;

use crate::error::{Result, SelectionError};

/// One billable slot of a multi-line subsection. Index 0 is the primary line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionLine {
    pub index: usize,
    pub is_primary: bool,
    pub selected_code: String,
    pub mode: LineMode,
    pub portability: Portability,
}

impl SelectionLine {
    fn new(index: usize) -> Self {
        Self {
            index,
            is_primary: index == 0,
            ..Self::default()
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_code.is_empty()
    }
}

/// What a subsection has selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// One selector (home bundles, trio/duo/uno, generic lists).
    Single {
        /// Inner tab of a `home_group` selector.
        home_kind: Option<HomeKind>,
        /// Active toggle key for toggle-driven selectors.
        toggle: Option<String>,
        selected_code: String,
        portability: Portability,
    },
    /// Ordered lines of a multi-line product.
    Lines { lines: Vec<SelectionLine> },
}

impl Selection {
    /// Fresh selection for a structure entry: first inner kind and first
    /// toggle active, nothing selected, a lone primary line for multi-line
    /// products.
    pub fn initial(entry: &StructureEntry) -> Self {
        match entry.component_type {
            ComponentType::MovilGroup => Selection::Lines {
                lines: vec![SelectionLine::new(0)],
            },
            ComponentType::HomeGroup => {
                let kind = HomeKind::default();
                Selection::Single {
                    home_kind: Some(kind),
                    toggle: first_toggle_key(&kind.toggle_options()),
                    selected_code: String::new(),
                    portability: Portability::default(),
                }
            }
            ComponentType::Duo | ComponentType::Uno => Selection::Single {
                home_kind: None,
                toggle: first_toggle_key(&entry.toggle_options),
                selected_code: String::new(),
                portability: Portability::default(),
            },
            ComponentType::Trio | ComponentType::Generic => Selection::Single {
                home_kind: None,
                toggle: None,
                selected_code: String::new(),
                portability: Portability::default(),
            },
        }
    }

    /// Lines of a multi-line selection; empty for single selectors.
    pub fn lines(&self) -> &[SelectionLine] {
        match self {
            Selection::Lines { lines } => lines,
            Selection::Single { .. } => &[],
        }
    }

    /// Number of selectors: one for single selections, one per line otherwise.
    pub fn selector_count(&self) -> usize {
        match self {
            Selection::Single { .. } => 1,
            Selection::Lines { lines } => lines.len(),
        }
    }

    /// Code picked in selector `line`, empty when nothing is picked.
    pub fn code_at(&self, line: usize) -> Option<&str> {
        match self {
            Selection::Single { selected_code, .. } => (line == 0).then_some(selected_code.as_str()),
            Selection::Lines { lines } => lines.get(line).map(|l| l.selected_code.as_str()),
        }
    }

    pub fn portability_at(&self, line: usize) -> Option<&Portability> {
        match self {
            Selection::Single { portability, .. } => (line == 0).then_some(portability),
            Selection::Lines { lines } => lines.get(line).map(|l| &l.portability),
        }
    }

    /// Non-empty codes in selector order.
    pub fn selected_codes(&self) -> Vec<&str> {
        (0..self.selector_count())
            .filter_map(|line| self.code_at(line))
            .filter(|code| !code.is_empty())
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_codes().is_empty()
    }
}

/// State of one structure row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionState {
    pub entry: StructureEntry,
    pub selection: Selection,
}

impl SubsectionState {
    pub fn new(entry: StructureEntry) -> Self {
        let selection = Selection::initial(&entry);
        Self { entry, selection }
    }

    pub fn name(&self) -> &str {
        &self.entry.subsection
    }

    pub fn clear(&mut self) {
        self.selection = Selection::initial(&self.entry);
    }

    /// Toggle buttons currently offered: the inner kind's for home bundles,
    /// the structure's for duo/uno selectors.
    pub fn toggle_options(&self) -> Vec<ToggleOption> {
        match (&self.selection, self.entry.component_type) {
            (Selection::Single { home_kind: Some(kind), .. }, ComponentType::HomeGroup) => {
                kind.toggle_options()
            }
            (Selection::Single { .. }, ComponentType::Duo | ComponentType::Uno) => {
                self.entry.toggle_options.clone()
            }
            _ => Vec::new(),
        }
    }

    /// Prefix filter of each selector, in selector order.
    pub fn selector_prefixes(&self) -> Vec<Vec<String>> {
        match &self.selection {
            Selection::Lines { lines } => lines
                .iter()
                .map(|line| {
                    self.entry
                        .prefix_for_mode(line.mode)
                        .map(|prefix| vec![prefix.to_string()])
                        .unwrap_or_default()
                })
                .collect(),
            Selection::Single {
                home_kind, toggle, ..
            } => {
                let active_toggle = || {
                    self.toggle_options()
                        .into_iter()
                        .find(|option| Some(&option.key) == toggle.as_ref())
                        .map(|option| option.prefixes)
                        .unwrap_or_default()
                };
                let prefixes = match self.entry.component_type {
                    ComponentType::HomeGroup => match home_kind {
                        Some(HomeKind::Trio) | None => vec!["T".to_string()],
                        Some(_) => active_toggle(),
                    },
                    ComponentType::Trio if self.entry.prefixes.is_empty() => vec!["T".to_string()],
                    ComponentType::Duo | ComponentType::Uno => active_toggle(),
                    _ => self.entry.prefixes.clone(),
                };
                vec![prefixes]
            }
        }
    }

    pub fn additional_line_count(&self) -> usize {
        self.selection.lines().len().saturating_sub(1)
    }
}

/// One top-level section with exactly one active subsection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionState {
    pub name: String,
    pub active_subsection: String,
    pub subsections: Vec<SubsectionState>,
}

impl SectionState {
    pub fn subsection(&self, name: &str) -> Option<&SubsectionState> {
        self.subsections.iter().find(|sub| sub.name() == name)
    }

    pub fn active(&self) -> Option<&SubsectionState> {
        self.subsection(&self.active_subsection)
    }

    fn clear(&mut self) {
        self.subsections.iter_mut().for_each(SubsectionState::clear);
    }
}

/// The whole selection tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub active_section: String,
    pub sections: Vec<SectionState>,
}

impl SelectionState {
    /// Builds the tree in structure order. The first section and the first
    /// subsection of each section start active. Repeated section/subsection
    /// pairs keep their first row.
    pub fn from_structure(entries: &[StructureEntry]) -> Self {
        let mut sections: Vec<SectionState> = Vec::new();
        for entry in entries {
            let section = match sections.iter_mut().position(|s| s.name == entry.section) {
                Some(pos) => &mut sections[pos],
                None => {
                    sections.push(SectionState {
                        name: entry.section.clone(),
                        active_subsection: entry.subsection.clone(),
                        subsections: Vec::new(),
                    });
                    let last = sections.len() - 1;
                    &mut sections[last]
                }
            };
            if section.subsection(&entry.subsection).is_some() {
                debug!(
                    section = %entry.section,
                    subsection = %entry.subsection,
                    "duplicate structure row ignored"
                );
                continue;
            }
            section.subsections.push(SubsectionState::new(entry.clone()));
        }
        let active_section = sections.first().map(|s| s.name.clone()).unwrap_or_default();
        Self {
            active_section,
            sections,
        }
    }

    pub fn section(&self, name: &str) -> Option<&SectionState> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Finds a section ignoring ASCII case.
    pub fn section_ignore_case(&self, name: &str) -> Option<&SectionState> {
        self.sections.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn active_section(&self) -> Option<&SectionState> {
        self.section(&self.active_section)
    }

    /// Active subsection of the active section.
    pub fn active_subsection(&self) -> Option<&SubsectionState> {
        self.active_section().and_then(SectionState::active)
    }

    pub fn subsection(&self, section: &str, subsection: &str) -> Result<&SubsectionState> {
        self.section(section)
            .ok_or_else(|| unknown_section(section))?
            .subsection(subsection)
            .ok_or_else(|| unknown_subsection(section, subsection))
    }

    fn subsection_mut(&mut self, section: &str, subsection: &str) -> Result<&mut SubsectionState> {
        self.sections
            .iter_mut()
            .find(|s| s.name == section)
            .ok_or_else(|| unknown_section(section))?
            .subsections
            .iter_mut()
            .find(|sub| sub.name() == subsection)
            .ok_or_else(|| unknown_subsection(section, subsection))
    }

    /// Stores `code` in selector `line`. An empty code clears the selector.
    pub fn select_row(&mut self, section: &str, subsection: &str, line: usize, code: &str) -> Result<()> {
        let state = self.subsection_mut(section, subsection)?;
        match &mut state.selection {
            Selection::Single { selected_code, .. } if line == 0 => {
                *selected_code = code.to_string();
            }
            Selection::Lines { lines } if line < lines.len() => {
                lines[line].selected_code = code.to_string();
            }
            _ => return Err(line_out_of_range(section, subsection, line)),
        }
        Ok(())
    }

    /// Appends an additional line and returns its index.
    pub fn add_line(&mut self, section: &str, subsection: &str) -> Result<usize> {
        let state = self.subsection_mut(section, subsection)?;
        let max = state.entry.max_additional_lines;
        let additional = state.additional_line_count();
        let Selection::Lines { lines } = &mut state.selection else {
            return Err(unsupported(section, subsection, "additional lines"));
        };
        if additional >= max {
            return Err(SelectionError::LineLimitReached {
                section: section.to_string(),
                subsection: subsection.to_string(),
                max,
            });
        }
        let index = lines.len();
        lines.push(SelectionLine::new(index));
        Ok(index)
    }

    /// Removes an additional line; the rest are re-indexed `0..n-1`.
    pub fn remove_line(&mut self, section: &str, subsection: &str, line: usize) -> Result<()> {
        let state = self.subsection_mut(section, subsection)?;
        let Selection::Lines { lines } = &mut state.selection else {
            return Err(unsupported(section, subsection, "additional lines"));
        };
        if line == 0 {
            return Err(SelectionError::PrimaryLineRemoval {
                section: section.to_string(),
                subsection: subsection.to_string(),
            });
        }
        if line >= lines.len() {
            return Err(line_out_of_range(section, subsection, line));
        }
        lines.remove(line);
        for (index, remaining) in lines.iter_mut().enumerate() {
            remaining.index = index;
            remaining.is_primary = index == 0;
        }
        Ok(())
    }

    pub fn set_portability(
        &mut self,
        section: &str,
        subsection: &str,
        line: usize,
        portability: Portability,
    ) -> Result<()> {
        let state = self.subsection_mut(section, subsection)?;
        match &mut state.selection {
            Selection::Single {
                portability: current,
                ..
            } if line == 0 => *current = portability,
            Selection::Lines { lines } if line < lines.len() => lines[line].portability = portability,
            _ => return Err(line_out_of_range(section, subsection, line)),
        }
        Ok(())
    }

    /// Makes `subsection` active and clears every sibling.
    pub fn switch_active_subsection(&mut self, section: &str, subsection: &str) -> Result<()> {
        let state = self
            .sections
            .iter_mut()
            .find(|s| s.name == section)
            .ok_or_else(|| unknown_section(section))?;
        if state.subsection(subsection).is_none() {
            return Err(unknown_subsection(section, subsection));
        }
        for sibling in state.subsections.iter_mut().filter(|sub| sub.name() != subsection) {
            sibling.clear();
        }
        state.active_subsection = subsection.to_string();
        Ok(())
    }

    /// Makes `section` active and clears every other section.
    pub fn switch_active_section(&mut self, section: &str) -> Result<()> {
        if self.section(section).is_none() {
            return Err(unknown_section(section));
        }
        for other in self.sections.iter_mut().filter(|s| s.name != section) {
            other.clear();
        }
        self.active_section = section.to_string();
        Ok(())
    }

    /// Switches the inner tab of a home bundle; clears its code and
    /// portability.
    pub fn switch_home_kind(&mut self, section: &str, subsection: &str, kind: HomeKind) -> Result<()> {
        let state = self.subsection_mut(section, subsection)?;
        let is_home_group = state.entry.component_type == ComponentType::HomeGroup;
        match &mut state.selection {
            Selection::Single {
                home_kind,
                toggle,
                selected_code,
                portability,
            } if is_home_group => {
                *home_kind = Some(kind);
                *toggle = first_toggle_key(&kind.toggle_options());
                selected_code.clear();
                *portability = Portability::default();
                Ok(())
            }
            _ => Err(unsupported(section, subsection, "inner kinds")),
        }
    }

    /// Switches the active toggle; clears the code and portability.
    pub fn switch_toggle(&mut self, section: &str, subsection: &str, key: &str) -> Result<()> {
        let state = self.subsection_mut(section, subsection)?;
        let options = state.toggle_options();
        if options.is_empty() {
            return Err(unsupported(section, subsection, "toggle options"));
        }
        if !options.iter().any(|option| option.key == key) {
            return Err(SelectionError::UnknownToggle {
                section: section.to_string(),
                subsection: subsection.to_string(),
                key: key.to_string(),
            });
        }
        if let Selection::Single {
            toggle,
            selected_code,
            portability,
            ..
        } = &mut state.selection
        {
            *toggle = Some(key.to_string());
            selected_code.clear();
            *portability = Portability::default();
        }
        Ok(())
    }

    /// Switches the product family of a line; clears its code.
    pub fn switch_line_mode(
        &mut self,
        section: &str,
        subsection: &str,
        line: usize,
        mode: LineMode,
    ) -> Result<()> {
        let state = self.subsection_mut(section, subsection)?;
        let Selection::Lines { lines } = &mut state.selection else {
            return Err(unsupported(section, subsection, "line modes"));
        };
        let target = lines
            .get_mut(line)
            .ok_or_else(|| line_out_of_range(section, subsection, line))?;
        target.mode = mode;
        target.selected_code.clear();
        Ok(())
    }
}

fn first_toggle_key(options: &[ToggleOption]) -> Option<String> {
    options.first().map(|option| option.key.clone())
}

fn unknown_section(section: &str) -> SelectionError {
    SelectionError::UnknownSection {
        section: section.to_string(),
    }
}

fn unknown_subsection(section: &str, subsection: &str) -> SelectionError {
    SelectionError::UnknownSubsection {
        section: section.to_string(),
        subsection: subsection.to_string(),
    }
}

fn line_out_of_range(section: &str, subsection: &str, line: usize) -> SelectionError {
    SelectionError::LineOutOfRange {
        section: section.to_string(),
        subsection: subsection.to_string(),
        line,
    }
}

fn unsupported(section: &str, subsection: &str, operation: &'static str) -> SelectionError {
    SelectionError::Unsupported {
        section: section.to_string(),
        subsection: subsection.to_string(),
        operation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movil(subsection: &str, max: usize) -> StructureEntry {
        let mut entry = StructureEntry::new("Movil", subsection, ComponentType::MovilGroup);
        entry.multi_prefixes.insert("multi".into(), "NM".into());
        entry.multi_prefixes.insert("datos".into(), "ND".into());
        entry.max_additional_lines = max;
        entry
    }

    fn state() -> SelectionState {
        SelectionState::from_structure(&[
            StructureEntry::new("Hogar", "nuevo", ComponentType::HomeGroup),
            StructureEntry::new("Hogar", "cartera", ComponentType::HomeGroup),
            movil("nuevo", 2),
            movil("cartera", 2),
        ])
    }

    #[test]
    fn tree_follows_structure_order() {
        let state = state();
        assert_eq!(state.active_section, "Hogar");
        assert_eq!(state.sections.len(), 2);
        assert_eq!(state.sections[1].active_subsection, "nuevo");
        let home = state.subsection("Hogar", "nuevo").unwrap();
        assert_eq!(home.toggle_options().len(), 0);
        assert_eq!(home.selector_prefixes(), vec![vec!["T".to_string()]]);
    }

    #[test]
    fn add_line_stops_at_limit_without_mutating() {
        let mut state = state();
        assert_eq!(state.add_line("Movil", "nuevo"), Ok(1));
        assert_eq!(state.add_line("Movil", "nuevo"), Ok(2));
        let before = state.clone();
        let err = state.add_line("Movil", "nuevo").unwrap_err();
        assert!(matches!(err, SelectionError::LineLimitReached { max: 2, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn primary_line_cannot_be_removed() {
        let mut state = state();
        let err = state.remove_line("Movil", "nuevo", 0).unwrap_err();
        assert!(matches!(err, SelectionError::PrimaryLineRemoval { .. }));
        let err = state.remove_line("Movil", "nuevo", 3).unwrap_err();
        assert!(matches!(err, SelectionError::LineOutOfRange { line: 3, .. }));
    }

    #[test]
    fn subsection_switch_clears_siblings_only() {
        let mut state = state();
        state.select_row("Movil", "nuevo", 0, "NM01").unwrap();
        state.select_row("Movil", "cartera", 0, "CM01").unwrap();
        state.switch_active_subsection("Movil", "cartera").unwrap();
        let section = state.section("Movil").unwrap();
        assert_eq!(section.active_subsection, "cartera");
        assert!(!section.subsection("nuevo").unwrap().selection.has_selection());
        assert_eq!(section.active().unwrap().selection.selected_codes(), vec!["CM01"]);
    }

    #[test]
    fn section_switch_clears_other_sections() {
        let mut state = state();
        state.select_row("Hogar", "nuevo", 0, "T1").unwrap();
        state.select_row("Movil", "nuevo", 0, "NM01").unwrap();
        state.switch_active_section("Movil").unwrap();
        assert!(!state.subsection("Hogar", "nuevo").unwrap().selection.has_selection());
        assert!(state.subsection("Movil", "nuevo").unwrap().selection.has_selection());
        assert!(state.switch_active_section("Fijo").is_err());
    }

    #[test]
    fn home_kind_switch_resets_toggle_and_code() {
        let mut state = state();
        state.select_row("Hogar", "nuevo", 0, "T1").unwrap();
        state.switch_home_kind("Hogar", "nuevo", HomeKind::Uno).unwrap();
        let home = state.subsection("Hogar", "nuevo").unwrap();
        assert_eq!(home.selection.code_at(0), Some(""));
        assert_eq!(home.selector_prefixes(), vec![vec!["F".to_string()]]);

        state.switch_toggle("Hogar", "nuevo", "fijo").unwrap();
        let home = state.subsection("Hogar", "nuevo").unwrap();
        assert_eq!(home.selector_prefixes(), vec![vec!["FI".to_string()]]);
        let err = state.switch_toggle("Hogar", "nuevo", "cable").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownToggle { .. }));
    }

    #[test]
    fn line_mode_switch_clears_code() {
        let mut state = state();
        state.select_row("Movil", "nuevo", 0, "NM01").unwrap();
        state.switch_line_mode("Movil", "nuevo", 0, LineMode::Datos).unwrap();
        let sub = state.subsection("Movil", "nuevo").unwrap();
        assert_eq!(sub.selection.code_at(0), Some(""));
        assert_eq!(sub.selector_prefixes(), vec![vec!["ND".to_string()]]);
        let err = state.switch_line_mode("Hogar", "nuevo", 0, LineMode::Voz).unwrap_err();
        assert!(matches!(err, SelectionError::Unsupported { .. }));
    }

    #[test]
    fn state_serializes_as_plain_values() {
        let state = state();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["sections"][1]["subsections"][0]["selection"]["kind"], "lines");
        let back: SelectionState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
