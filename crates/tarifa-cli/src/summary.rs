use anyhow::Result;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::json;
use tarifa_core::{DetailPanel, PromotionShape, resolve_shape};
use tarifa_ingest::LoadedData;
use tarifa_model::CellValue;

use crate::cli::OutputFormatArg;
use crate::commands::{ContractOutcome, StructureSummary};

pub fn print_catalog(data: &LoadedData) {
    println!("Catalog: {}", data.files.catalog.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Plan"),
        header_cell("Value"),
        header_cell("Promo 1"),
        header_cell("Months 1"),
        header_cell("Promo 2"),
        header_cell("Months 2"),
        header_cell("Shape"),
    ]);
    apply_table_style(&mut table);
    for column in [2, 3, 4, 5, 6] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in &data.catalog.rows {
        let shape = resolve_shape(row).shape;
        table.add_row(vec![
            Cell::new(&row.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&row.plan_name),
            value_cell(&row.list_price),
            value_cell(&row.promo1_price),
            value_cell(&row.promo1_months),
            value_cell(&row.promo2_price),
            value_cell(&row.promo2_months),
            shape_cell(shape),
        ]);
    }
    println!("{table}");
    let load = &data.catalog;
    if load.has_warnings() {
        eprintln!("Warnings:");
        for column in &load.missing_columns {
            eprintln!("- missing column: {column}");
        }
        for code in &load.duplicate_codes {
            eprintln!("- duplicate code: {code}");
        }
    }
}

pub fn print_structure(summaries: &[StructureSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Subsection"),
        header_cell("Component"),
        header_cell("Prefixes"),
        header_cell("Toggles"),
        header_cell("Max additional"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for summary in summaries {
        let entry = &summary.entry;
        let prefixes = if entry.multi_prefixes.is_empty() {
            entry.prefixes.join(", ")
        } else {
            entry
                .multi_prefixes
                .iter()
                .map(|(role, prefix)| format!("{role}:{prefix}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let toggles = entry.toggle_captions();
        table.add_row(vec![
            Cell::new(&entry.section)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.subsection),
            Cell::new(entry.component_type),
            if prefixes.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(prefixes)
            },
            if toggles.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(toggles.join("\n"))
            },
            Cell::new(entry.max_additional_lines),
            count_cell(summary.option_count),
        ]);
    }
    println!("{table}");
}

pub fn print_contract(outcome: &ContractOutcome, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Json => {
            let rejected: Vec<_> = outcome
                .rejected
                .iter()
                .map(|r| json!({"index": r.index, "action": r.action, "error": r.error.to_string()}))
                .collect();
            let value = json!({
                "template": outcome.document.template.file_name(),
                "file_name": outcome.document.file_name,
                "fields": outcome.document.fields,
                "panel": outcome.panel,
                "rejected": rejected,
                "notice_sent": outcome.notice_sent,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormatArg::Table => {
            println!("Template: {}", outcome.document.template.file_name());
            println!("Output: {}", outcome.document.file_name);
            let mut table = Table::new();
            table.set_header(vec![header_cell("Placeholder"), header_cell("Value")]);
            apply_table_style(&mut table);
            for (name, value) in &outcome.document.fields {
                let value_cell = if value.trim().is_empty() {
                    dim_cell("-")
                } else {
                    Cell::new(value)
                };
                table.add_row(vec![Cell::new(name).fg(Color::Cyan), value_cell]);
            }
            println!("{table}");
            if let Some(panel) = &outcome.panel {
                print_panel(panel);
            }
        }
    }
    if !outcome.notice_sent {
        eprintln!("Submission notice was not delivered");
    }
    if !outcome.rejected.is_empty() {
        eprintln!("Rejected actions:");
        for rejected in &outcome.rejected {
            eprintln!("- #{} {}: {}", rejected.index, rejected.action, rejected.error);
        }
    }
    Ok(())
}

fn print_panel(panel: &DetailPanel) {
    println!("{} / {}", panel.section, panel.subsection);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Plan"),
        header_cell("Pricing"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for line in &panel.lines {
        table.add_row(vec![
            Cell::new(&line.label).add_attribute(Attribute::Bold),
            match &line.plan_name {
                Some(plan) => Cell::new(plan),
                None => dim_cell("-"),
            },
            Cell::new(&line.pricing),
        ]);
    }
    println!("{table}");
    for billing in panel.billing_lines() {
        println!("{billing}");
    }
    for total in panel.total_lines() {
        println!("{total}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Empty => dim_cell("-"),
        CellValue::Number(_) => Cell::new(value),
        CellValue::Text(_) => Cell::new(value).fg(Color::Yellow),
    }
}

fn shape_cell(shape: PromotionShape) -> Cell {
    let cell = Cell::new(shape);
    match shape {
        PromotionShape::NoDiscount => cell.fg(Color::DarkGrey),
        PromotionShape::DualDiscountUnstructured => cell.fg(Color::Yellow),
        _ => cell.fg(Color::Green),
    }
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::Red)
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
