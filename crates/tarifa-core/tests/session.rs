use tarifa_core::{Catalog, Selection, SelectionError, Session, aggregate, line_label, matches_prefix};
use tarifa_model::{CatalogRow, CellValue, ComponentType, StructureEntry};

fn catalog() -> Catalog {
    Catalog::new(vec![
        CatalogRow::new("NM01", "Plan A")
            .with_list_price(15000.0)
            .with_promo1(10000.0, CellValue::Number(6.0)),
        CatalogRow::new("NM02", "Plan B").with_list_price(20000.0),
        CatalogRow::new("NM03", "Plan C").with_list_price(20000.0),
    ])
}

fn mobile_session(max_additional: usize) -> Session {
    let mut entry = StructureEntry::new("Movil", "nuevo", ComponentType::MovilGroup);
    entry.multi_prefixes.insert("multi".into(), "NM".into());
    entry.max_additional_lines = max_additional;
    Session::new(catalog(), &[entry])
}

#[test]
fn prefix_matching_needs_a_digit_after_the_prefix() {
    assert!(matches_prefix("T1", "T"));
    assert!(!matches_prefix("TRIO", "T"));
    assert!(matches_prefix("T", "T"));
}

#[test]
fn removing_a_line_relabels_the_rest() {
    let mut session = mobile_session(4);
    for code in ["NM01", "NM02", "NM03"] {
        let line = session.add_line("Movil", "nuevo").unwrap();
        session.select_row("Movil", "nuevo", line, code).unwrap();
    }
    session.remove_line("Movil", "nuevo", 1).unwrap();

    let sub = session.state().subsection("Movil", "nuevo").unwrap();
    let lines = sub.selection.lines();
    assert_eq!(lines.len(), 3);
    let indices: Vec<usize> = lines.iter().map(|line| line.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(lines[1].selected_code, "NM02");
    assert_eq!(lines[2].selected_code, "NM03");
    assert_eq!(line_label(lines[1].index), "Adicional 1");
    assert_eq!(line_label(lines[2].index), "Adicional 2");
    assert!(lines[0].is_primary && !lines[1].is_primary);
}

#[test]
fn line_limit_and_primary_removal_are_rejected() {
    let mut session = mobile_session(1);
    session.add_line("Movil", "nuevo").unwrap();
    let before = session.state().clone();
    assert_eq!(
        session.add_line("Movil", "nuevo").unwrap_err(),
        SelectionError::LineLimitReached {
            section: "Movil".into(),
            subsection: "nuevo".into(),
            max: 1,
        }
    );
    assert!(matches!(
        session.remove_line("Movil", "nuevo", 0),
        Err(SelectionError::PrimaryLineRemoval { .. })
    ));
    assert_eq!(session.state(), &before);
}

#[test]
fn two_undiscounted_lines_have_no_discount_clause() {
    let mut session = mobile_session(1);
    session.select_row("Movil", "nuevo", 0, "NM02").unwrap();
    let line = session.add_line("Movil", "nuevo").unwrap();
    session.select_row("Movil", "nuevo", line, "NM03").unwrap();

    let sub = session.state().subsection("Movil", "nuevo").unwrap();
    let resolved = session.resolved_lines(sub);
    let totals = aggregate(resolved.iter().map(|(_, promo)| promo));
    assert!(!totals.any_discount_applied);
    assert_eq!(totals.total_list_price, 40000.0);
    let sentence = totals.summary_sentence();
    assert!(!sentence.contains("con descuento"));
    assert_eq!(
        sentence,
        "Usted está contratando 1 linea con el Plan B, 1 linea con el Plan C, con valor total de $40000"
    );
}

#[test]
fn primary_line_panel_shows_pricing_and_billing() {
    let mut session = mobile_session(2);
    session.select_row("Movil", "nuevo", 0, "NM01").unwrap();
    let panel = session.detail_panel("Movil", "nuevo").unwrap();
    assert_eq!(
        panel.lines[0].pricing,
        "Línea Principal: Promo de $10000 por 6 meses, a partir del mes 7 valor normal de $15000."
    );
    assert_eq!(
        panel.billing_lines(),
        vec!["Plan A: $10000 (Promo) / $15000 (Sin descuento) — 6 meses"]
    );
}

#[test]
fn selection_state_serializes_with_kind_tags() {
    let mut session = mobile_session(1);
    session.select_row("Movil", "nuevo", 0, "NM01").unwrap();
    let sub = session.state().subsection("Movil", "nuevo").unwrap();
    assert!(matches!(sub.selection, Selection::Lines { .. }));
    let json = serde_json::to_value(&sub.selection).unwrap();
    assert_eq!(json["kind"], "lines");
    assert_eq!(json["lines"][0]["selected_code"], "NM01");
}
