//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use sis_ingest::ReconcileOutcome;
use sis_model::StudentRecord;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn print_students(records: &[StudentRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Enrollment Number"),
        header_cell("Name"),
        header_cell("Age"),
        header_cell("Date of Birth"),
        header_cell("Internal Id"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for record in records {
        table.add_row(vec![
            Cell::new(record.enrollment_number.as_str()),
            Cell::new(record.full_name()),
            Cell::new(record.age()),
            Cell::new(record.date_of_birth),
            Cell::new(record.id),
        ]);
    }
    println!("{table}");
    println!("{} student(s)", records.len());
}

pub fn print_student(record: &StudentRecord) {
    println!("Enrollment number: {}", record.enrollment_number);
    println!("Name:              {}", record.full_name());
    println!("Date of birth:     {}", record.date_of_birth);
    println!("Age:               {}", record.age());
    println!("Internal id:       {}", record.id);
}

pub fn print_import_summary(outcome: &ReconcileOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Outcome"),
        header_cell("Lines"),
        header_cell("Line Numbers"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new("Accepted"),
        Cell::new(outcome.accepted_count()),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate"),
        Cell::new(outcome.duplicate_count()),
        Cell::new(join_lines(&outcome.duplicate_lines)),
    ]);
    table.add_row(vec![
        Cell::new("Invalid"),
        Cell::new(outcome.invalid_count()),
        Cell::new(join_lines(&outcome.invalid_lines)),
    ]);
    println!("{table}");
}

fn join_lines(lines: &[u64]) -> String {
    lines
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
