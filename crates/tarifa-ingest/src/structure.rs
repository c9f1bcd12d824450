//! Structure sheet parsing and the built-in default structure.

use std::collections::BTreeMap;
use std::path::Path;

use tarifa_model::{CellValue, ComponentType, DEFAULT_MAX_ADDITIONAL, StructureEntry, ToggleOption};
use tracing::{debug, warn};

use crate::csv::{ColumnAliases, HeaderIndex, SheetTable, read_sheet};
use crate::error::Result;
use crate::normalization::normalize_number;

const SECTION: ColumnAliases = ColumnAliases::new("section", &["Section", "Sección", "Seccion"]);
const SUBSECTION: ColumnAliases =
    ColumnAliases::new("subsection", &["Subsection", "Subsección", "Subseccion"]);
const COMPONENT_TYPE: ColumnAliases = ColumnAliases::new("component type", &["ComponentType", "Tipo"]);
const PREFIXES: ColumnAliases = ColumnAliases::new("prefixes", &["Prefixes"]);
const TOGGLE_OPTIONS: ColumnAliases = ColumnAliases::new("toggle options", &["ToggleOptions"]);
const MULTI_PREFIXES: ColumnAliases = ColumnAliases::new("multi prefixes", &["MultiPrefixes"]);
const MAX_ADDITIONAL: ColumnAliases =
    ColumnAliases::new("max additional", &["MaxAdditional", "MaxAdicional"]);
const EXTRA_MAPPING: ColumnAliases = ColumnAliases::new("extra mapping", &["ExtraMapping"]);

/// `T, D ,` -> `["T", "D"]`.
pub fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string)
        .collect()
}

/// `fibra_tv:DT|DX,fibra:F` -> two options. Entries without a key are dropped.
pub fn parse_toggle_options(raw: &str) -> Vec<ToggleOption> {
    raw.split(',')
        .filter_map(|entry| {
            let (key, prefixes) = entry.split_once(':').unwrap_or((entry, ""));
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let prefixes = prefixes
                .split('|')
                .map(str::trim)
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_string)
                .collect();
            Some(ToggleOption::new(key, prefixes))
        })
        .collect()
}

/// `multi:NM,datos:ND,voz:NV` -> role to prefix. Roles are lowercased.
pub fn parse_multi_prefixes(raw: &str) -> BTreeMap<String, String> {
    parse_pairs(raw, ',')
        .map(|(role, prefix)| (role.to_lowercase(), prefix.to_string()))
        .collect()
}

/// `NM02:NM02S;NM03:NM03S` -> primary code to additional-line code.
pub fn parse_extra_mapping(raw: &str) -> BTreeMap<String, String> {
    parse_pairs(raw, ';')
        .filter(|(_, target)| !target.is_empty())
        .map(|(source, target)| (source.to_string(), target.to_string()))
        .collect()
}

fn parse_pairs(raw: &str, separator: char) -> impl Iterator<Item = (&str, &str)> {
    raw.split(separator).filter_map(|entry| {
        let (key, value) = entry.split_once(':')?;
        let key = key.trim();
        (!key.is_empty()).then_some((key, value.trim()))
    })
}

fn parse_max_additional(raw: &str, default_max: usize) -> usize {
    match normalize_number(raw, true, false) {
        CellValue::Number(value) if value <= 0.0 => 0,
        CellValue::Number(value) => value as usize,
        _ => default_max,
    }
}

pub fn parse_structure(table: &SheetTable, default_max: usize) -> Vec<StructureEntry> {
    let index = HeaderIndex::new(&table.headers);
    for column in [SECTION, SUBSECTION, COMPONENT_TYPE] {
        if !index.has(&column) {
            warn!(path = %table.path.display(), column = column.name, "structure column not found");
        }
    }

    let mut entries = Vec::with_capacity(table.rows.len());
    for (line, record) in table.rows.iter().enumerate() {
        let section = index.value(record, &SECTION).trim();
        let subsection = index.value(record, &SUBSECTION).trim();
        if section.is_empty() || subsection.is_empty() {
            debug!(line = line + 2, "structure row without section skipped");
            continue;
        }
        let raw_type = index.value(record, &COMPONENT_TYPE);
        let component_type = ComponentType::parse_lenient(raw_type);
        if component_type == ComponentType::Generic && !raw_type.trim().eq_ignore_ascii_case("generic") {
            debug!(value = raw_type, line = line + 2, "unknown component type read as generic");
        }
        let mut entry = StructureEntry::new(section, subsection, component_type);
        entry.prefixes = parse_prefix_list(index.value(record, &PREFIXES));
        entry.toggle_options = parse_toggle_options(index.value(record, &TOGGLE_OPTIONS));
        entry.multi_prefixes = parse_multi_prefixes(index.value(record, &MULTI_PREFIXES));
        entry.max_additional_lines =
            parse_max_additional(index.value(record, &MAX_ADDITIONAL), default_max);
        entry.extra_mapping = parse_extra_mapping(index.value(record, &EXTRA_MAPPING));
        entries.push(entry);
    }
    entries
}

pub fn load_structure(path: &Path, default_max: usize) -> Result<Vec<StructureEntry>> {
    let table = read_sheet(path)?;
    let entries = parse_structure(&table, default_max);
    debug!(path = %path.display(), entries = entries.len(), "structure loaded");
    Ok(entries)
}

/// Structure used when the data directory has no structure sheet.
pub fn default_structure() -> Vec<StructureEntry> {
    let home = |subsection: &str| StructureEntry::new("Hogar", subsection, ComponentType::HomeGroup);
    let movil = |subsection: &str, roles: &str, extra: &str| {
        let mut entry = StructureEntry::new("Movil", subsection, ComponentType::MovilGroup);
        entry.multi_prefixes = parse_multi_prefixes(roles);
        entry.max_additional_lines = DEFAULT_MAX_ADDITIONAL;
        entry.extra_mapping = parse_extra_mapping(extra);
        entry
    };
    vec![
        home("nuevo"),
        home("cartera"),
        movil("nuevo", "multi:NM,datos:ND,voz:NV", "NM02:NM02S;NM03:NM03S"),
        movil("cartera", "multi:CM,datos:CD,voz:CV", "CM02:CM02S;CM03:CM03S"),
    ]
}
