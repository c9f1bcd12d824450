//! Catalog rows: one purchasable plan each.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// One plan from the `catalog` sheet.
///
/// Prices are normalized without text fallback, so they are either
/// `Number` or `Empty`. Month columns keep unparseable text (for example
/// `"permanente"`) because the renderer prints it verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogRow {
    pub code: String,
    pub plan_name: String,
    pub list_price: CellValue,
    pub promo1_price: CellValue,
    pub promo1_months: CellValue,
    pub promo2_price: CellValue,
    pub promo2_months: CellValue,
    pub details: String,
    pub section: String,
    pub subsection: String,
    pub extra_for: String,
}

impl CatalogRow {
    pub fn new(code: impl Into<String>, plan_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            plan_name: plan_name.into(),
            ..Self::default()
        }
    }

    pub fn with_list_price(mut self, price: f64) -> Self {
        self.list_price = CellValue::Number(price);
        self
    }

    pub fn with_promo1(mut self, price: f64, months: CellValue) -> Self {
        self.promo1_price = CellValue::Number(price);
        self.promo1_months = months;
        self
    }

    pub fn with_promo2(mut self, price: f64, months: CellValue) -> Self {
        self.promo2_price = CellValue::Number(price);
        self.promo2_months = months;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Fixed-line plans (name contains `FIJO`) are the only home plans that
    /// accept number portability.
    pub fn is_fixed_line(&self) -> bool {
        self.plan_name.to_uppercase().contains("FIJO")
    }
}
