//! Catalog sheet parsing.

use std::collections::BTreeSet;
use std::path::Path;

use tarifa_model::CatalogRow;
use tracing::{debug, warn};

use crate::csv::{ColumnAliases, HeaderIndex, SheetTable, read_sheet};
use crate::error::Result;
use crate::normalization::normalize_number;

const CODE: ColumnAliases = ColumnAliases::new("code", &["Código", "Codigo", "Code"]);
const PLAN: ColumnAliases = ColumnAliases::new("plan", &["Plan", "Name"]);
const LIST_PRICE: ColumnAliases = ColumnAliases::new("list price", &["Valor", "Value", "Price"]);
const PROMO1: ColumnAliases = ColumnAliases::new("promo1", &["Promo1", "Promo_1"]);
const MONTHS1: ColumnAliases = ColumnAliases::new("months1", &["Meses1", "Meses_1"]);
const PROMO2: ColumnAliases = ColumnAliases::new("promo2", &["Promo2", "Promo_2"]);
const MONTHS2: ColumnAliases = ColumnAliases::new("months2", &["Meses2", "Meses_2"]);
const DETAILS: ColumnAliases = ColumnAliases::new("details", &["Detalles", "Details"]);
const SECTION: ColumnAliases = ColumnAliases::new("section", &["Section", "Sección", "Seccion"]);
const SUBSECTION: ColumnAliases =
    ColumnAliases::new("subsection", &["Subsection", "Subsección", "Subseccion"]);
const EXTRA_FOR: ColumnAliases = ColumnAliases::new("extra for", &["ExtraFor", "Extra_for"]);

const REQUIRED: [ColumnAliases; 8] = [
    CODE, PLAN, LIST_PRICE, PROMO1, MONTHS1, PROMO2, MONTHS2, DETAILS,
];

/// Parsed catalog plus the problems found while reading it.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    /// Rows in sheet order, first occurrence of each code only.
    pub rows: Vec<CatalogRow>,
    /// Required logical columns no header alias mapped to.
    pub missing_columns: Vec<String>,
    /// Codes seen more than once; later rows were dropped.
    pub duplicate_codes: Vec<String>,
}

impl CatalogLoad {
    pub fn has_warnings(&self) -> bool {
        !self.missing_columns.is_empty() || !self.duplicate_codes.is_empty()
    }
}

pub fn load_catalog(path: &Path) -> Result<CatalogLoad> {
    let table = read_sheet(path)?;
    let load = parse_catalog(&table);
    debug!(
        path = %path.display(),
        rows = load.rows.len(),
        "catalog loaded"
    );
    Ok(load)
}

pub fn parse_catalog(table: &SheetTable) -> CatalogLoad {
    let index = HeaderIndex::new(&table.headers);
    let missing_columns: Vec<String> = REQUIRED
        .iter()
        .filter(|column| !index.has(column))
        .map(|column| column.name.to_string())
        .collect();
    for column in &missing_columns {
        warn!(
            path = %table.path.display(),
            column = %column,
            "catalog column not found"
        );
    }

    let mut seen = BTreeSet::new();
    let mut rows = Vec::with_capacity(table.rows.len());
    let mut duplicate_codes = Vec::new();
    for (line, record) in table.rows.iter().enumerate() {
        let row = parse_row(&index, record);
        if row.code.is_empty() {
            debug!(line = line + 2, "catalog row without code skipped");
            continue;
        }
        if !seen.insert(row.code.clone()) {
            warn!(code = %row.code, line = line + 2, "duplicate catalog code ignored");
            duplicate_codes.push(row.code);
            continue;
        }
        rows.push(row);
    }

    CatalogLoad {
        rows,
        missing_columns,
        duplicate_codes,
    }
}

fn parse_row(index: &HeaderIndex, record: &[String]) -> CatalogRow {
    let text = |column: &ColumnAliases| index.value(record, column).trim().to_string();
    let price = |column: &ColumnAliases| normalize_number(index.value(record, column), false, false);
    let months = |column: &ColumnAliases| normalize_number(index.value(record, column), true, true);
    CatalogRow {
        code: text(&CODE),
        plan_name: text(&PLAN),
        list_price: price(&LIST_PRICE),
        promo1_price: price(&PROMO1),
        promo1_months: months(&MONTHS1),
        promo2_price: price(&PROMO2),
        promo2_months: months(&MONTHS2),
        details: text(&DETAILS),
        section: text(&SECTION),
        subsection: text(&SUBSECTION),
        extra_for: text(&EXTRA_FOR),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tarifa_model::CellValue;

    use super::*;
    use crate::csv::read_sheet_from_reader;

    fn table(input: &str) -> SheetTable {
        read_sheet_from_reader(input.as_bytes(), Path::new("catalog.csv")).unwrap()
    }

    #[test]
    fn parses_aliases_and_normalizes_values() {
        let load = parse_catalog(&table(
            "Codigo,Name,Price,Promo_1,Meses_1,Promo2,Meses2,Details\n\
             NM01,Plan A,\"15.990\",\"9.990,5\",6 meses,N/A,permanente,Gigas libres\n",
        ));
        assert!(load.missing_columns.is_empty());
        let row = &load.rows[0];
        assert_eq!(row.code, "NM01");
        assert_eq!(row.list_price, CellValue::Number(15.99));
        assert_eq!(row.promo1_price, CellValue::Number(9990.5));
        assert_eq!(row.promo1_months, CellValue::Number(6.0));
        assert_eq!(row.promo2_price, CellValue::Empty);
        assert_eq!(row.promo2_months, CellValue::Text("permanente".to_string()));
        assert_eq!(row.details, "Gigas libres");
    }

    #[test]
    fn reports_missing_columns_and_duplicates() {
        let load = parse_catalog(&table("Code,Plan,Valor\nT1,Trio,100\nT1,Trio bis,200\n,Sin codigo,1\n"));
        assert_eq!(
            load.missing_columns,
            vec!["promo1", "months1", "promo2", "months2", "details"]
        );
        assert_eq!(load.duplicate_codes, vec!["T1"]);
        assert_eq!(load.rows.len(), 1);
        assert_eq!(load.rows[0].plan_name, "Trio");
        assert!(load.has_warnings());
    }
}
