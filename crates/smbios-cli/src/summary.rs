use std::collections::BTreeSet;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use smbios_model::{ComplianceReport, IssueKind};

/// Print a table of failing records and table-count shortfalls.
pub fn print_summary(report: &ComplianceReport, color: bool) {
    if report.is_compliant() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Handle"),
        header_cell("Type"),
        header_cell("Findings"),
        header_cell("Kinds"),
        header_cell("Fields"),
    ]);
    apply_summary_table_style(&mut table);
    if color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total = 0usize;
    for record in report.failing_records() {
        total += record.findings.len();
        let fields: BTreeSet<&str> = record
            .findings
            .iter()
            .filter_map(|finding| finding.field.as_deref())
            .collect();
        let kinds = kind_labels(record.findings.iter().map(|finding| finding.issue.kind()));
        table.add_row(vec![
            Cell::new(&record.handle)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(record.table_type),
            count_cell(record.findings.len()),
            Cell::new(kinds),
            Cell::new(fields.into_iter().collect::<Vec<_>>().join(", ")),
        ]);
    }
    for finding in &report.table_counts {
        total += 1;
        table.add_row(vec![
            dim_cell("-"),
            Cell::new(finding.table_type),
            count_cell(1),
            Cell::new(finding.issue.kind().label()),
            Cell::new(finding.message()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(total).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Distinct kind labels in first-seen order.
fn kind_labels(kinds: impl Iterator<Item = IssueKind>) -> String {
    let mut labels: Vec<&str> = Vec::new();
    for kind in kinds {
        if !labels.contains(&kind.label()) {
            labels.push(kind.label());
        }
    }
    labels.join(", ")
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
