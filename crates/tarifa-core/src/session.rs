//! Selection controller.
//!
//! [`Session`] owns the catalog and the selection tree. Callers mutate the
//! tree only through its methods and hand `&Session` to the renderers.

use tarifa_model::{CatalogRow, HomeKind, LineMode, Portability, StructureEntry};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{Result, SelectionError};
use crate::panel::{DetailPanel, build_detail_panel};
use crate::promotion::{ResolvedPromotion, resolve_shape};
use crate::selection::{Selection, SelectionState, SubsectionState};

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    state: SelectionState,
}

impl Session {
    pub fn new(catalog: Catalog, structure: &[StructureEntry]) -> Self {
        let state = SelectionState::from_structure(structure);
        debug!(
            rows = catalog.len(),
            sections = state.sections.len(),
            "session created"
        );
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Replaces the catalog wholesale. Selections are kept; codes that no
    /// longer exist resolve to "no plan".
    pub fn reload_catalog(&mut self, catalog: Catalog) {
        info!(rows = catalog.len(), "catalog reloaded");
        self.catalog = catalog;
    }

    /// Row selected in selector `line`, if its code is still in the catalog.
    pub fn selected_row(&self, subsection: &SubsectionState, line: usize) -> Option<&CatalogRow> {
        subsection
            .selection
            .code_at(line)
            .and_then(|code| self.catalog.find_by_code(code))
    }

    /// Resolved promotion of every selector with a valid plan, in line order.
    pub fn resolved_lines(&self, subsection: &SubsectionState) -> Vec<(usize, ResolvedPromotion)> {
        (0..subsection.selection.selector_count())
            .filter_map(|line| self.selected_row(subsection, line).map(|row| (line, resolve_shape(row))))
            .collect()
    }

    pub fn detail_panel(&self, section: &str, subsection: &str) -> Result<DetailPanel> {
        let state = self.state.subsection(section, subsection)?;
        Ok(build_detail_panel(&self.catalog, state))
    }

    /// Selects `code` in selector `line`. A non-empty code missing from the
    /// catalog is ignored. Selecting a home plan without `FIJO` in its name
    /// drops any fixed-line portability.
    pub fn select_row(&mut self, section: &str, subsection: &str, line: usize, code: &str) -> Result<()> {
        let code = code.trim();
        if !code.is_empty() && !self.catalog.contains(code) {
            debug!(section, subsection, line, code, "code not in catalog, selection ignored");
            return Ok(());
        }
        self.state.select_row(section, subsection, line, code)?;
        let target = self.state.subsection(section, subsection)?;
        if matches!(target.selection, Selection::Single { .. })
            && !self.catalog.find_by_code(code).is_some_and(CatalogRow::is_fixed_line)
            && target.selection.portability_at(0).is_some_and(|p| *p != Portability::default())
        {
            debug!(section, subsection, "plan without fixed line, portability cleared");
            self.state
                .set_portability(section, subsection, 0, Portability::default())?;
        }
        debug!(section, subsection, line, code, "row selected");
        Ok(())
    }

    pub fn add_line(&mut self, section: &str, subsection: &str) -> Result<usize> {
        let index = self.state.add_line(section, subsection)?;
        debug!(section, subsection, line = index, "line added");
        Ok(index)
    }

    pub fn remove_line(&mut self, section: &str, subsection: &str, line: usize) -> Result<()> {
        self.state.remove_line(section, subsection, line)?;
        debug!(section, subsection, line, "line removed");
        Ok(())
    }

    /// Records portability for a selector. Single (home) selectors only
    /// accept it while the selected plan is a fixed-line plan.
    pub fn set_portability(
        &mut self,
        section: &str,
        subsection: &str,
        line: usize,
        portability: Portability,
    ) -> Result<()> {
        let target = self.state.subsection(section, subsection)?;
        if matches!(target.selection, Selection::Single { .. })
            && portability.requested
            && !self.selected_row(target, line).is_some_and(CatalogRow::is_fixed_line)
        {
            return Err(SelectionError::PortabilityUnavailable {
                section: section.to_string(),
                subsection: subsection.to_string(),
            });
        }
        self.state
            .set_portability(section, subsection, line, portability)?;
        debug!(section, subsection, line, "portability updated");
        Ok(())
    }

    pub fn switch_active_subsection(&mut self, section: &str, subsection: &str) -> Result<()> {
        self.state.switch_active_subsection(section, subsection)?;
        debug!(section, subsection, "active subsection switched");
        Ok(())
    }

    pub fn switch_active_section(&mut self, section: &str) -> Result<()> {
        self.state.switch_active_section(section)?;
        debug!(section, "active section switched");
        Ok(())
    }

    pub fn switch_home_kind(&mut self, section: &str, subsection: &str, kind: HomeKind) -> Result<()> {
        self.state.switch_home_kind(section, subsection, kind)?;
        debug!(section, subsection, kind = kind.as_str(), "home kind switched");
        Ok(())
    }

    pub fn switch_toggle(&mut self, section: &str, subsection: &str, key: &str) -> Result<()> {
        self.state.switch_toggle(section, subsection, key)?;
        debug!(section, subsection, toggle = key, "toggle switched");
        Ok(())
    }

    pub fn switch_line_mode(
        &mut self,
        section: &str,
        subsection: &str,
        line: usize,
        mode: LineMode,
    ) -> Result<()> {
        self.state.switch_line_mode(section, subsection, line, mode)?;
        debug!(section, subsection, line, mode = mode.as_str(), "line mode switched");
        Ok(())
    }
}
