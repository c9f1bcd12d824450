use super::{money, month_number};
use crate::promotion::{PromotionShape, ResolvedPromotion};

/// Medium-length pricing text shown in the detail panel.
pub fn render_pricing_line(promo: &ResolvedPromotion) -> String {
    let list = money(&promo.list_price);
    let promo1 = money(&promo.promo1);
    let promo2 = money(&promo.promo2);
    let months1 = &promo.months1;
    let months2 = &promo.months2;
    let renewal1 = month_number(promo.first_renewal_month());
    let renewal2 = month_number(promo.second_renewal_month());

    match promo.shape {
        PromotionShape::NoDiscount => format!("Valor total de {list}."),
        PromotionShape::SingleDiscountTimed => format!(
            "Promo de {promo1} por {months1} meses, a partir del mes {renewal1} valor normal de {list}."
        ),
        PromotionShape::SingleDiscountPermanent => {
            format!("Promo de {promo1} por vigencia permanente.")
        }
        PromotionShape::DualDiscountTimed => format!(
            "Promo de {promo1} por {months1} meses, a partir del mes {renewal1} promo de {promo2} \
             por {months2} meses, a partir del mes {renewal2} valor normal de {list}."
        ),
        PromotionShape::DualDiscountTailPermanent => format!(
            "Promo de {promo1} por {months1} meses, a partir del mes {renewal1} promo de {promo2} \
             por vigencia permanente."
        ),
        PromotionShape::DualDiscountUnstructured => {
            let first = if months1.is_present() {
                format!(" ({months1} meses)")
            } else {
                String::new()
            };
            let second = if months2.is_present() {
                format!(" ({months2} meses)")
            } else {
                String::new()
            };
            format!("Promociones: {promo1}{first} y {promo2}{second}. Valor normal {list}.")
        }
    }
}

/// One-line billing summary, prefixed with the plan name.
pub fn render_billing_line(promo: &ResolvedPromotion) -> String {
    let plan = &promo.plan_name;
    let list = money(&promo.list_price);
    let promo1 = money(&promo.promo1);
    let promo2 = money(&promo.promo2);
    let months1 = &promo.months1;
    let months2 = &promo.months2;

    match promo.shape {
        PromotionShape::NoDiscount => format!("{plan}: {list} (Sin descuento)"),
        PromotionShape::SingleDiscountTimed => {
            format!("{plan}: {promo1} (Promo) / {list} (Sin descuento) — {months1} meses")
        }
        PromotionShape::SingleDiscountPermanent => {
            format!("{plan}: {promo1} (Promo permanente) / {list} (Sin descuento)")
        }
        PromotionShape::DualDiscountTimed => format!(
            "{plan}: {promo1} (Promo1) / {promo2} (Promo2) / {list} (Sin descuento) — {months1}m + {months2}m"
        ),
        PromotionShape::DualDiscountTailPermanent => format!(
            "{plan}: {promo1} (Promo1) / {promo2} (Promo2 permanente) / {list} (Sin descuento) — {months1}m"
        ),
        PromotionShape::DualDiscountUnstructured => format!("{plan}: {promo1} / {promo2} / {list}"),
    }
}

#[cfg(test)]
mod tests {
    use tarifa_model::{CatalogRow, CellValue};

    use super::*;
    use crate::promotion::resolve_shape;

    #[test]
    fn single_timed_lines() {
        let promo = resolve_shape(
            &CatalogRow::new("NM01", "Plan A")
                .with_list_price(15000.0)
                .with_promo1(10000.0, CellValue::Number(6.0)),
        );
        assert_eq!(
            render_pricing_line(&promo),
            "Promo de $10000 por 6 meses, a partir del mes 7 valor normal de $15000."
        );
        assert_eq!(
            render_billing_line(&promo),
            "Plan A: $10000 (Promo) / $15000 (Sin descuento) — 6 meses"
        );
    }

    #[test]
    fn dual_timed_uses_doubled_second_offset() {
        let promo = resolve_shape(
            &CatalogRow::new("NM09", "Plan Dual")
                .with_list_price(30000.0)
                .with_promo1(20000.0, CellValue::Number(3.0))
                .with_promo2(25000.0, CellValue::Number(4.0)),
        );
        assert_eq!(
            render_pricing_line(&promo),
            "Promo de $20000 por 3 meses, a partir del mes 4 promo de $25000 por 4 meses, \
             a partir del mes 9 valor normal de $30000."
        );
        assert_eq!(
            render_billing_line(&promo),
            "Plan Dual: $20000 (Promo1) / $25000 (Promo2) / $30000 (Sin descuento) — 3m + 4m"
        );
    }

    #[test]
    fn unstructured_lines_skip_missing_months() {
        let mut row = CatalogRow::new("NM10", "Plan Raro")
            .with_list_price(9990.0)
            .with_promo1(5000.0, CellValue::Empty)
            .with_promo2(7000.0, CellValue::Number(2.0));
        row.promo1_months = CellValue::Text("permanente".into());
        let promo = resolve_shape(&row);
        assert_eq!(promo.shape, PromotionShape::DualDiscountUnstructured);
        assert_eq!(
            render_pricing_line(&promo),
            "Promociones: $5000 (permanente meses) y $7000 (2 meses). Valor normal $9990."
        );
        assert_eq!(render_billing_line(&promo), "Plan Raro: $5000 / $7000 / $9990");
    }
}
