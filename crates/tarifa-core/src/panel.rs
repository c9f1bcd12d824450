//! On-screen detail panel of a subsection.

use serde::Serialize;
use tarifa_model::format_amount;

use crate::aggregate::{Aggregate, aggregate};
use crate::catalog::Catalog;
use crate::promotion::{MonthSpec, ResolvedPromotion, resolve_shape};
use crate::render::{
    EMPTY_DETAILS_TEXT, EMPTY_PRICING_TEXT, line_label, render_billing_line, render_pricing_line,
};
use crate::selection::{Selection, SubsectionState};

/// One selector of the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelLine {
    /// `Línea Principal` / `Adicional N`.
    pub label: String,
    /// `None` when nothing valid is selected.
    pub plan_name: Option<String>,
    pub details: String,
    pub pricing: String,
    pub billing: Option<String>,
    pub offer: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub section: String,
    pub subsection: String,
    pub lines: Vec<PanelLine>,
    pub totals: Aggregate,
}

impl DetailPanel {
    /// `Total con descuento` and `Total sin descuento` lines.
    pub fn total_lines(&self) -> [String; 2] {
        [
            format!(
                "Total con descuento: ${}",
                format_amount(self.totals.total_discounted)
            ),
            format!(
                "Total sin descuento: ${}",
                format_amount(self.totals.total_list_price)
            ),
        ]
    }

    pub fn billing_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| line.billing.as_deref())
            .collect()
    }
}

/// Price box of a single plan: promotions with their months, then the list
/// price.
pub fn offer_lines(promo: &ResolvedPromotion) -> Vec<String> {
    let months_text = |months: &MonthSpec| match months {
        MonthSpec::Numeric(count) => format!("{count} meses"),
        MonthSpec::Text(text) => text.clone(),
        MonthSpec::Absent => "-".to_string(),
    };
    let mut lines = Vec::new();
    if !promo.promo1.is_empty() {
        lines.push(format!("Promo 1: ${} ({})", promo.promo1, months_text(&promo.months1)));
    }
    if !promo.promo2.is_empty() {
        lines.push(format!("Promo 2: ${} ({})", promo.promo2, months_text(&promo.months2)));
    }
    if !promo.list_price.is_empty() {
        lines.push(format!("Sin descuento: ${}", promo.list_price));
    }
    lines
}

/// Builds the panel for `subsection`. Codes missing from the catalog show
/// the empty-state texts and stay out of the totals.
pub fn build_detail_panel(catalog: &Catalog, subsection: &SubsectionState) -> DetailPanel {
    let multi_line = matches!(subsection.selection, Selection::Lines { .. });
    let resolved: Vec<Option<ResolvedPromotion>> = (0..subsection.selection.selector_count())
        .map(|line| {
            subsection
                .selection
                .code_at(line)
                .and_then(|code| catalog.find_by_code(code))
                .map(resolve_shape)
        })
        .collect();

    let lines = resolved
        .iter()
        .enumerate()
        .map(|(index, promo)| {
            let label = line_label(index);
            let pricing_text = promo
                .as_ref()
                .map_or_else(|| EMPTY_PRICING_TEXT.to_string(), render_pricing_line);
            let pricing = if multi_line {
                format!("Línea {}: {pricing_text}", label.trim_start_matches("Línea "))
            } else {
                pricing_text
            };
            PanelLine {
                label,
                plan_name: promo.as_ref().map(|p| p.plan_name.clone()),
                details: promo
                    .as_ref()
                    .map_or_else(|| EMPTY_DETAILS_TEXT.to_string(), |p| p.details.clone()),
                pricing,
                billing: promo.as_ref().map(render_billing_line),
                offer: promo.as_ref().map(offer_lines).unwrap_or_default(),
            }
        })
        .collect();

    DetailPanel {
        section: subsection.entry.section.clone(),
        subsection: subsection.name().to_string(),
        lines,
        totals: aggregate(resolved.iter().flatten()),
    }
}
