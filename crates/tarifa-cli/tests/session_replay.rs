//! Replays session files against a data directory on disk.

use std::fs;
use std::path::Path;

use tarifa_cli::session::{SessionAction, load_session_file, replay};
use tarifa_core::{Catalog, SelectionError, Session, build_contract};
use tarifa_ingest::load_data_dir;
use tarifa_model::{ContractOptions, PickupMode, TemplateKind};

const CATALOG: &str = "Código,Plan,Valor,Promo1,Meses1,Promo2,Meses2,Detalles\n\
                       NM01,Plan A,15000,10000,6,,,Gigas libres\n\
                       NM02,Plan B,20000,,,,,\n\
                       XB01,Plan B Extra,5000,,,,,\n\
                       T1,Trio Full,45990,29990,12,,,Fibra + TV + Fijo\n";

const STRUCTURE: &str = "Section,Subsection,ComponentType,MultiPrefixes,MaxAdditional,ExtraMapping\n\
                         Hogar,nuevo,home_group,,,\n\
                         Movil,nuevo,movil_group,\"multi:NM,datos:ND\",1,NM02:XB01\n";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write file");
}

fn session_for(dir: &Path) -> Session {
    let data = load_data_dir(dir, 4).expect("load data dir");
    Session::new(Catalog::new(data.catalog.rows), &data.structure)
}

#[test]
fn mobile_session_file_produces_contract() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "catalog.csv", CATALOG);
    write(dir.path(), "structure.csv", STRUCTURE);
    write(
        dir.path(),
        "session.json",
        r#"{
            "form": {
                "titular": "María José",
                "address": "Los Aromos 12",
                "branch": "Centro",
                "billing_cycle": "5",
                "date": "02-03-2026",
                "pickup": "Sucursal"
            },
            "actions": [
                {"action": "select_section", "section": "Movil"},
                {"action": "select_row", "section": "Movil", "subsection": "nuevo", "code": "NM01"},
                {"action": "add_line", "section": "Movil", "subsection": "nuevo"},
                {"action": "add_line", "section": "Movil", "subsection": "nuevo"},
                {"action": "select_row", "section": "Movil", "subsection": "nuevo", "line": 1, "code": "NM02"}
            ]
        }"#,
    );

    let file = load_session_file(&dir.path().join("session.json")).expect("session file");
    assert_eq!(file.form.pickup, PickupMode::Sucursal);

    let mut session = session_for(dir.path());
    let rejected = replay(&mut session, &file.actions);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].index, 3);
    assert_eq!(rejected[0].action, "add_line");
    assert!(matches!(rejected[0].error, SelectionError::LineLimitReached { max: 1, .. }));

    let options = ContractOptions::default().with_executive("Ana Rojas");
    let document = build_contract(&session, &file.form, &options);
    assert_eq!(document.template, TemplateKind::Mobile);
    assert_eq!(document.file_name, "María José.docx");
    assert_eq!(document.field("PLAN"), Some("Plan A"));
    assert_eq!(document.field("EJECUTIVO"), Some("Ana Rojas"));
    insta::assert_snapshot!(document.field("ALL").unwrap(), @"Usted está contratando 1 linea con el Plan A, 1 linea con el Plan B, con valor total de $35000 y con descuento quedaría en $30000.");
}

#[test]
fn home_portability_without_fixed_line_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "catalog.csv", CATALOG);
    write(dir.path(), "structure.csv", STRUCTURE);

    let actions = vec![
        SessionAction::SelectRow {
            section: "Hogar".into(),
            subsection: "nuevo".into(),
            line: 0,
            code: "T1".into(),
        },
        SessionAction::SetPortability {
            section: "Hogar".into(),
            subsection: "nuevo".into(),
            line: 0,
            requested: true,
            number: "221234567".into(),
            donor: "VTR".into(),
        },
    ];
    let mut session = session_for(dir.path());
    let rejected = replay(&mut session, &actions);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].action, "set_portability");

    let document = build_contract(&session, &Default::default(), &ContractOptions::default());
    assert_eq!(document.template, TemplateKind::Home);
    assert_eq!(document.field("PLAN"), Some("Trio Full"));
    assert_eq!(document.field("MESES1-1"), Some("13"));
    assert_eq!(document.field("PORTA"), Some(""));
}

#[test]
fn extra_mapping_is_offered_on_additional_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "catalog.csv", CATALOG);
    write(dir.path(), "structure.csv", STRUCTURE);

    let mut session = session_for(dir.path());
    session.select_row("Movil", "nuevo", 0, "NM02").unwrap();
    session.add_line("Movil", "nuevo").unwrap();
    let sub = session.state().subsection("Movil", "nuevo").unwrap();
    let options = session.catalog().options_for(sub);
    let codes: Vec<&str> = options[1].iter().map(|row| row.code.as_str()).collect();
    assert_eq!(codes, vec!["NM01", "NM02", "XB01"]);
}
