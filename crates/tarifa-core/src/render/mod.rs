//! Contract text renderers.
//!
//! Every renderer takes a [`ResolvedPromotion`](crate::ResolvedPromotion) and
//! branches on its shape; none of them re-reads the catalog row.

mod lines;
mod paragraph;

pub use lines::{render_billing_line, render_pricing_line};
pub use paragraph::{append_portability, render_home_clause, render_paragraph};

use tarifa_model::{CellValue, Portability};

/// Pricing text for a selector without a valid plan.
pub const EMPTY_PRICING_TEXT: &str = "Selecciona un plan para ver precios.";

/// Details text for a selector without a valid plan.
pub const EMPTY_DETAILS_TEXT: &str = "Selecciona un plan para ver detalles.";

/// Per-line inputs of the paragraph renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    /// The first selected line opens with the salutation.
    pub is_primary: bool,
    /// Contract holder named in the salutation.
    pub subject_name: &'a str,
    pub portability: Option<&'a Portability>,
}

impl<'a> RenderContext<'a> {
    pub fn primary(subject_name: &'a str) -> Self {
        Self {
            is_primary: true,
            subject_name,
            portability: None,
        }
    }

    pub fn additional() -> Self {
        Self::default()
    }

    pub fn with_portability(mut self, portability: &'a Portability) -> Self {
        self.portability = Some(portability);
        self
    }
}

/// `Línea Principal` for index 0, `Adicional N` otherwise.
pub fn line_label(index: usize) -> String {
    if index == 0 {
        "Línea Principal".to_string()
    } else {
        format!("Adicional {index}")
    }
}

fn money(value: &CellValue) -> String {
    format!("${value}")
}

fn month_number(month: Option<i64>) -> String {
    month.map(|month| month.to_string()).unwrap_or_default()
}
