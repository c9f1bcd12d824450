//! Promotion shape resolution.
//!
//! A catalog row is classified once into a [`PromotionShape`]; every renderer
//! consumes the same [`ResolvedPromotion`] so the paragraph, pricing line and
//! billing line always agree on prices and months.

use std::fmt;

use serde::{Deserialize, Serialize};
use tarifa_model::{CatalogRow, CellValue};

/// The month a second promotion ends is `months2 * TAIL_OFFSET_MULTIPLIER + 1`,
/// not `months2 + 1`. The first promotion is not doubled.
pub const TAIL_OFFSET_MULTIPLIER: i64 = 2;

/// How a row's discounts are worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionShape {
    /// No first promotion.
    NoDiscount,
    /// First promotion for a number of months, no second promotion.
    SingleDiscountTimed,
    /// First promotion without a month count, no second promotion.
    SingleDiscountPermanent,
    /// Both promotions with month counts.
    DualDiscountTimed,
    /// Timed first promotion followed by a permanent second one.
    DualDiscountTailPermanent,
    /// Both promotions, first without a month count.
    DualDiscountUnstructured,
}

impl PromotionShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionShape::NoDiscount => "no_discount",
            PromotionShape::SingleDiscountTimed => "single_timed",
            PromotionShape::SingleDiscountPermanent => "single_permanent",
            PromotionShape::DualDiscountTimed => "dual_timed",
            PromotionShape::DualDiscountTailPermanent => "dual_tail_permanent",
            PromotionShape::DualDiscountUnstructured => "dual_unstructured",
        }
    }
}

impl fmt::Display for PromotionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A month cell as the renderers see it.
///
/// Only a non-zero number counts as a month count; zero and free text are
/// kept as text, blank is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonthSpec {
    #[default]
    Absent,
    Numeric(i64),
    Text(String),
}

impl MonthSpec {
    pub fn from_cell(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => MonthSpec::Absent,
            CellValue::Number(value) if *value != 0.0 => MonthSpec::Numeric(value.trunc() as i64),
            CellValue::Number(_) => MonthSpec::Text(cell.to_string()),
            CellValue::Text(text) if text.trim().is_empty() => MonthSpec::Absent,
            CellValue::Text(text) => MonthSpec::Text(text.trim().to_string()),
        }
    }

    pub fn numeric(&self) -> Option<i64> {
        match self {
            MonthSpec::Numeric(months) => Some(*months),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric().is_some()
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, MonthSpec::Absent)
    }
}

impl fmt::Display for MonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSpec::Absent => Ok(()),
            MonthSpec::Numeric(months) => write!(f, "{months}"),
            MonthSpec::Text(text) => f.write_str(text),
        }
    }
}

/// Everything the renderers need from one catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPromotion {
    pub shape: PromotionShape,
    pub plan_name: String,
    pub details: String,
    pub list_price: CellValue,
    pub promo1: CellValue,
    pub promo2: CellValue,
    pub months1: MonthSpec,
    pub months2: MonthSpec,
}

impl ResolvedPromotion {
    /// Month the first promotion ends: `months1 + 1`. `None` on overflow.
    pub fn first_renewal_month(&self) -> Option<i64> {
        self.months1.numeric().and_then(|months| months.checked_add(1))
    }

    /// Month the second promotion ends: `months2 * TAIL_OFFSET_MULTIPLIER + 1`.
    pub fn second_renewal_month(&self) -> Option<i64> {
        self.months2
            .numeric()
            .and_then(|months| offset_month(months, TAIL_OFFSET_MULTIPLIER))
    }

    pub fn has_discount(&self) -> bool {
        !self.promo1.is_empty()
    }
}

/// `months * multiplier + 1`, or `None` when it does not fit.
pub fn offset_month(months: i64, multiplier: i64) -> Option<i64> {
    months.checked_mul(multiplier)?.checked_add(1)
}

/// Classifies a row. The first matching rule wins and every row gets exactly
/// one shape.
pub fn resolve_shape(row: &CatalogRow) -> ResolvedPromotion {
    let months1 = MonthSpec::from_cell(&row.promo1_months);
    let months2 = MonthSpec::from_cell(&row.promo2_months);
    let shape = if row.promo1_price.is_empty() {
        PromotionShape::NoDiscount
    } else if row.promo2_price.is_empty() {
        if months1.is_numeric() {
            PromotionShape::SingleDiscountTimed
        } else {
            PromotionShape::SingleDiscountPermanent
        }
    } else if months1.is_numeric() && months2.is_numeric() {
        PromotionShape::DualDiscountTimed
    } else if months1.is_numeric() {
        PromotionShape::DualDiscountTailPermanent
    } else {
        PromotionShape::DualDiscountUnstructured
    };
    ResolvedPromotion {
        shape,
        plan_name: row.plan_name.clone(),
        details: row.details.clone(),
        list_price: row.list_price.clone(),
        promo1: row.promo1_price.clone(),
        promo2: row.promo2_price.clone(),
        months1,
        months2,
    }
}
