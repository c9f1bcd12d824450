//! Totals over the selected lines.

use serde::Serialize;
use tarifa_model::format_amount;

use crate::promotion::ResolvedPromotion;

const UNNAMED_PLAN: &str = "Sin nombre";

/// Plan counts and totals for a set of resolved lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Aggregate {
    /// Plan name and line count, in first-appearance order.
    pub per_plan_counts: Vec<(String, usize)>,
    pub total_list_price: f64,
    /// Sum of the first promotion, or the list price for lines without one.
    pub total_discounted: f64,
    /// At least one line had a first promotion.
    pub any_discount_applied: bool,
}

impl Aggregate {
    pub fn line_count(&self) -> usize {
        self.per_plan_counts.iter().map(|(_, count)| count).sum()
    }

    /// `Usted está contratando ...` sentence; empty when no line has a plan.
    ///
    /// The discounted total is only mentioned when a discount applied and it
    /// differs from the list total.
    pub fn summary_sentence(&self) -> String {
        if self.per_plan_counts.is_empty() {
            return String::new();
        }
        let plans = self
            .per_plan_counts
            .iter()
            .map(|(plan, count)| {
                let noun = if *count == 1 { "linea" } else { "lineas" };
                format!("{count} {noun} con el {plan}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        let list_total = format_amount(self.total_list_price);
        if self.any_discount_applied && self.total_discounted != self.total_list_price {
            format!(
                "Usted está contratando {plans}, con valor total de ${list_total} y con descuento quedaría en ${}.",
                format_amount(self.total_discounted)
            )
        } else {
            format!("Usted está contratando {plans}, con valor total de ${list_total}")
        }
    }
}

/// Counts plans and sums totals. Lines without a plan never reach here: the
/// caller resolves codes first and skips stale or empty ones.
pub fn aggregate<'a>(lines: impl IntoIterator<Item = &'a ResolvedPromotion>) -> Aggregate {
    let mut result = Aggregate::default();
    for line in lines {
        let name = if line.plan_name.is_empty() {
            UNNAMED_PLAN
        } else {
            line.plan_name.as_str()
        };
        match result.per_plan_counts.iter_mut().find(|(plan, _)| plan == name) {
            Some((_, count)) => *count += 1,
            None => result.per_plan_counts.push((name.to_string(), 1)),
        }
        let list_price = line.list_price.number_or_zero();
        result.total_list_price += list_price;
        if line.has_discount() {
            result.total_discounted += line.promo1.number_or_zero();
            result.any_discount_applied = true;
        } else {
            result.total_discounted += list_price;
        }
    }
    result
}
