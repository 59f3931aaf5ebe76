use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use profpack_cli::pipeline::{ColumnsReport, RunReport};
use profpack_model::FieldLabel;

pub fn print_report(report: &RunReport) {
    println!("Mode: {}", report.kind);
    println!("Worksheet: {}", report.worksheet);
    if report.dry_run {
        println!("Dry run: no documents were written");
    } else {
        println!("Output: {}", report.output_dir.display());
    }
    if let Some(path) = &report.archive {
        println!("Archive: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Processed"),
        header_cell("Generated"),
        header_cell("Skipped (no name)"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(report.processed()),
        Cell::new(report.generated.len()).add_attribute(Attribute::Bold),
        Cell::new(report.skipped),
    ]);
    println!("{table}");
}

pub fn print_columns(report: &ColumnsReport) {
    println!("Worksheet: {}", report.worksheet);
    match report.columns.header_row() {
        Some(row) => println!("Header row: {row}"),
        None => println!("Header row: not found"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Label"),
        header_cell("Description"),
        header_cell("Column"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for label in FieldLabel::ALL {
        let column_cell = match report.columns.column(label) {
            Some(column) => Cell::new(column).add_attribute(Attribute::Bold),
            None => Cell::new("-").add_attribute(Attribute::Dim),
        };
        table.add_row(vec![
            Cell::new(label.as_str()),
            Cell::new(label.description()),
            column_cell,
        ]);
    }
    println!("{table}");
    if let Some(missing) = &report.missing {
        if missing.is_empty() {
            println!("All required columns present.");
        } else {
            let names: Vec<&str> = missing.iter().map(FieldLabel::as_str).collect();
            eprintln!("Missing required columns: {}", names.join(", "));
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}
