//! Terminal summaries rendered with comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use nna_cli::pipeline::ProfileOutcome;
use nna_model::{ColumnFlags, ColumnProfile, DataOverview, ProfileReport};

pub fn print_profile_summary(outcome: &ProfileOutcome) {
    println!("Input: {}", outcome.input.display());
    match &outcome.written {
        Some(written) => println!(
            "Output: {} ({} artifacts)",
            written.output_dir.display(),
            written.artifacts.len()
        ),
        None => println!("Output: dry run, nothing written"),
    }
    print_report(&outcome.report);
    if !outcome.kind_fallbacks.is_empty() {
        eprintln!("Declared kinds kept as inferred:");
        for fallback in &outcome.kind_fallbacks {
            eprintln!("- {fallback}");
        }
    }
}

pub fn print_report(report: &ProfileReport) {
    print_overview(&report.overview);
    println!("{}", column_table(report));
    println!(
        "Duplicate rows: {}    Charts: {}    Frequency tables: {}",
        report.quality.duplicate_rows,
        report.charts.len(),
        report.frequencies.len()
    );
}

fn print_overview(overview: &DataOverview) {
    let kinds: Vec<String> = overview
        .kind_counts
        .iter()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect();
    println!(
        "Rows: {}    Columns: {}    Missing cells: {}",
        overview.rows, overview.columns, overview.missing_cells
    );
    if !kinds.is_empty() {
        println!("Kinds: {}", kinds.join(", "));
    }
}

fn column_table(report: &ProfileReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Non-null"),
        header_cell("Distinct"),
        header_cell("Missing %"),
        header_cell("Range"),
        header_cell("Flags"),
    ]);
    apply_table_style(&mut table);
    for index in [2, 3, 4] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for entry in &report.dictionary {
        let flags = report.quality.column(&entry.name);
        table.add_row(vec![
            Cell::new(&entry.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.kind),
            Cell::new(entry.non_null),
            Cell::new(entry.distinct_count),
            missing_cell(entry.missing_pct, flags.is_some_and(|f| f.high_missing)),
            range_cell(entry),
            flags_cell(flags),
        ]);
    }
    table
}

/// Short labels for the flags raised on a column.
pub fn flag_labels(flags: &ColumnFlags) -> Vec<&'static str> {
    [
        (flags.constant, "constant"),
        (flags.near_constant && !flags.constant, "near-constant"),
        (flags.high_missing, "high-missing"),
        (flags.high_cardinality, "high-cardinality"),
        (flags.unique_id_candidate, "id?"),
    ]
    .into_iter()
    .filter_map(|(raised, label)| raised.then_some(label))
    .collect()
}

fn flags_cell(flags: Option<&ColumnFlags>) -> Cell {
    let labels = flags.map(flag_labels).unwrap_or_default();
    if labels.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(labels.join(", ")).fg(Color::Yellow)
    }
}

fn missing_cell(pct: f64, high: bool) -> Cell {
    let cell = Cell::new(format!("{pct:.2}"));
    if high {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    } else if pct == 0.0 {
        cell.fg(Color::DarkGrey)
    } else {
        cell
    }
}

fn range_cell(entry: &ColumnProfile) -> Cell {
    match &entry.numeric {
        Some(summary) => Cell::new(format!(
            "{} .. {}",
            nna_model::format_number(summary.min),
            nna_model::format_number(summary.max)
        )),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use nna_model::ColumnKind;

    use super::*;

    fn flags() -> ColumnFlags {
        ColumnFlags {
            name: "pais".to_string(),
            kind: ColumnKind::Categorical,
            null_count: 0,
            distinct_count: 1,
            dominant_share: 1.0,
            distinct_ratio: 0.25,
            missing_pct: 0.0,
            near_constant: true,
            high_cardinality: false,
            unique_id_candidate: false,
            constant: true,
            high_missing: false,
        }
    }

    #[test]
    fn constant_hides_near_constant() {
        assert_eq!(flag_labels(&flags()), vec!["constant"]);
    }

    #[test]
    fn lists_flags_in_fixed_order() {
        let mut flags = flags();
        flags.constant = false;
        flags.high_missing = true;
        flags.unique_id_candidate = true;
        assert_eq!(
            flag_labels(&flags),
            vec!["near-constant", "high-missing", "id?"]
        );
    }
}
