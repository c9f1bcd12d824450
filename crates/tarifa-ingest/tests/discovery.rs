//! Tests for data directory discovery and loading.

use std::fs;
use std::path::Path;

use tarifa_ingest::{IngestError, discover_data_files, load_data_dir};
use tarifa_model::{CellValue, ComponentType};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write sheet");
}

const CATALOG: &str = "Código,Plan,Valor,Promo1,Meses1,Promo2,Meses2,Detalles\n\
                       NM01,Plan Movil,\"12.990\",\"9.990\",6,,,\n\
                       T1,Trio Full,\"45.990\",,,,,Fibra 600\n";

#[test]
fn prefers_named_sheets() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a_first.csv", CATALOG);
    write(dir.path(), "Catalog.CSV", CATALOG);
    write(dir.path(), "structure.csv", "Section,Subsection,ComponentType\nHogar,nuevo,trio\n");
    write(dir.path(), "notes.txt", "ignored");

    let files = discover_data_files(dir.path()).expect("discover");
    assert_eq!(files.catalog.file_name().unwrap(), "Catalog.CSV");
    assert_eq!(files.structure.unwrap().file_name().unwrap(), "structure.csv");
}

#[test]
fn falls_back_to_first_csv_and_default_structure() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "b_planes.csv", CATALOG);
    write(dir.path(), "c_otros.csv", "Code,Plan\nX1,Otro\n");

    let loaded = load_data_dir(dir.path(), 4).expect("load");
    assert_eq!(loaded.files.catalog.file_name().unwrap(), "b_planes.csv");
    assert!(loaded.files.structure.is_none());
    assert_eq!(loaded.structure.len(), 4);
    assert_eq!(loaded.structure[2].component_type, ComponentType::MovilGroup);
    assert_eq!(loaded.catalog.rows.len(), 2);
    assert_eq!(loaded.catalog.rows[0].list_price, CellValue::Number(12.99));
    assert_eq!(loaded.catalog.rows[1].details, "Fibra 600");
}

#[test]
fn structure_sheet_alone_is_not_a_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "structure.csv", "Section,Subsection,ComponentType\n");
    let err = discover_data_files(dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::CatalogNotFound { .. }));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope");
    let err = load_data_dir(&missing, 4).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn blank_max_additional_uses_configured_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "catalog.csv", CATALOG);
    write(
        dir.path(),
        "structure.csv",
        "Section,Subsection,ComponentType,MultiPrefixes,MaxAdditional\n\
         Movil,nuevo,movil_group,multi:NM,\n\
         Movil,cartera,movil_group,multi:CM,1\n",
    );
    let loaded = load_data_dir(dir.path(), 7).expect("load");
    assert_eq!(loaded.structure[0].max_additional_lines, 7);
    assert_eq!(loaded.structure[1].max_additional_lines, 1);
}
