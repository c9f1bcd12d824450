use proptest::prelude::{Just, Strategy, any, prop_oneof, proptest};
use tarifa_core::{
    PromotionShape, RenderContext, TAIL_OFFSET_MULTIPLIER, render_billing_line,
    render_home_clause, render_paragraph, render_pricing_line, resolve_shape,
};
use tarifa_model::{CatalogRow, CellValue};

fn row(promo1: bool, promo2: bool, months1: bool, months2: bool) -> CatalogRow {
    let mut row = CatalogRow::new("X1", "Plan X").with_list_price(20000.0);
    if promo1 {
        row.promo1_price = CellValue::Number(10000.0);
    }
    if promo2 {
        row.promo2_price = CellValue::Number(5000.0);
    }
    if months1 {
        row.promo1_months = CellValue::Number(6.0);
    }
    if months2 {
        row.promo2_months = CellValue::Number(3.0);
    }
    row
}

#[test]
fn oversized_month_cells_render_without_renewal_months() {
    let row = CatalogRow::new("NM01", "Plan A")
        .with_list_price(15000.0)
        .with_promo1(10000.0, CellValue::Number(1e20))
        .with_promo2(12000.0, CellValue::Number(5e18));
    let promo = resolve_shape(&row);
    assert_eq!(promo.shape, PromotionShape::DualDiscountTimed);
    assert_eq!(promo.first_renewal_month(), None);
    assert_eq!(promo.second_renewal_month(), None);
    assert!(!render_pricing_line(&promo).is_empty());
    assert!(!render_billing_line(&promo).is_empty());
    assert!(!render_home_clause(&promo).is_empty());
    assert!(!render_paragraph(&promo, &RenderContext::primary("Ana")).is_empty());
}

#[test]
fn every_cell_combination_has_one_shape() {
    let mut seen = Vec::new();
    for mask in 0u8..16 {
        let (p1, p2, m1, m2) = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0);
        let promo = resolve_shape(&row(p1, p2, m1, m2));
        let expected = match (p1, p2, m1, m2) {
            (false, _, _, _) => PromotionShape::NoDiscount,
            (true, false, true, _) => PromotionShape::SingleDiscountTimed,
            (true, false, false, _) => PromotionShape::SingleDiscountPermanent,
            (true, true, true, true) => PromotionShape::DualDiscountTimed,
            (true, true, true, false) => PromotionShape::DualDiscountTailPermanent,
            (true, true, false, _) => PromotionShape::DualDiscountUnstructured,
        };
        assert_eq!(promo.shape, expected, "mask {mask:04b}");
        seen.push(promo.shape);
    }
    seen.sort_by_key(PromotionShape::as_str);
    seen.dedup();
    assert_eq!(seen.len(), 6);
}

#[test]
fn second_renewal_month_doubles_the_second_duration() {
    let promo = resolve_shape(
        &CatalogRow::new("NM09", "Plan Dual")
            .with_list_price(30000.0)
            .with_promo1(20000.0, CellValue::Number(3.0))
            .with_promo2(25000.0, CellValue::Number(4.0)),
    );
    assert_eq!(promo.first_renewal_month(), Some(4));
    assert_eq!(promo.second_renewal_month(), Some(4 * TAIL_OFFSET_MULTIPLIER + 1));
    assert_eq!(promo.second_renewal_month(), Some(9));
    assert!(render_pricing_line(&promo).contains("a partir del mes 9 valor normal"));
    assert!(!render_pricing_line(&promo).contains("a partir del mes 5"));
}

#[test]
fn single_timed_scenario_reads_back_its_prices() {
    let promo = resolve_shape(
        &CatalogRow::new("NM01", "Plan A")
            .with_list_price(15000.0)
            .with_promo1(10000.0, CellValue::Number(6.0)),
    );
    assert_eq!(promo.shape, PromotionShape::SingleDiscountTimed);
    assert_eq!(
        render_pricing_line(&promo),
        "Promo de $10000 por 6 meses, a partir del mes 7 valor normal de $15000."
    );
    assert_eq!(
        render_billing_line(&promo),
        "Plan A: $10000 (Promo) / $15000 (Sin descuento) — 6 meses"
    );
    insta::assert_snapshot!(render_home_clause(&promo), @"El valor total del plan es de $15000, al que se aplicará un valor promocional inicial de $10000 durante 6 meses. Finalizado este periodo, a partir del mes 7, se aplicará el valor completo sin descuento: $15000.");
}

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        (-5i32..40).prop_map(|n| CellValue::Number(f64::from(n))),
        "[a-z ]{0,8}".prop_map(CellValue::Text),
    ]
}

proptest! {
    #[test]
    fn renderers_agree_on_shape_for_any_row(
        list in cell(),
        promo1 in cell(),
        promo2 in cell(),
        months1 in cell(),
        months2 in cell(),
        primary in any::<bool>(),
    ) {
        let mut row = CatalogRow::new("P1", "Plan P");
        row.list_price = list;
        row.promo1_price = promo1;
        row.promo2_price = promo2;
        row.promo1_months = months1;
        row.promo2_months = months2;

        let promo = resolve_shape(&row);
        let again = resolve_shape(&row);
        assert_eq!(promo.shape, again.shape);

        let context = if primary { RenderContext::primary("Ana") } else { RenderContext::additional() };
        let paragraph = render_paragraph(&promo, &context);
        assert!(paragraph.contains("Plan P"));
        assert!(!render_pricing_line(&promo).is_empty());
        assert!(render_billing_line(&promo).starts_with("Plan P: "));
        assert!(render_home_clause(&promo).starts_with("El valor total del plan es de $"));

        if let Some(m1) = promo.months1.numeric() {
            assert_eq!(promo.first_renewal_month(), Some(m1 + 1));
        }
        if let Some(m2) = promo.months2.numeric() {
            assert_eq!(promo.second_renewal_month(), Some(m2 * 2 + 1));
        }
    }
}
