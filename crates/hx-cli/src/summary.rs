use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hx_extract::{ExtractOutcome, ExtractReport};
use hx_model::CleaningStats;
use hx_output::{ReadmitMonth, TopCondition};

use hx_cli::types::{RunResult, TransformOutcome};

pub fn print_extract_summary(report: &ExtractReport) {
    println!("Output: {}", report.path.display());
    match &report.outcome {
        ExtractOutcome::Filtered {
            since,
            data_value_type,
        } => {
            println!("Since: {since}");
            println!(
                "Data value type: {}",
                data_value_type.as_deref().unwrap_or("(all)")
            );
        }
        ExtractOutcome::Unfiltered => println!("No rows matched; wrote an unfiltered sample"),
    }
    println!("Rows: {}", report.rows);
}

pub fn print_run_summary(result: &RunResult) {
    println!("Store: {}", result.store_location.display());
    if let Some(load) = &result.load {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Raw table"),
            header_cell("Source"),
            header_cell("Rows"),
            header_cell("Columns"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for loaded in &load.tables {
            table.add_row(vec![
                name_cell(&loaded.table),
                dim_cell(&loaded.source.display().to_string()),
                Cell::new(loaded.rows),
                Cell::new(loaded.columns),
            ]);
        }
        table.add_row(vec![
            total_cell("TOTAL"),
            dim_cell("-"),
            Cell::new(load.total_rows()).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
        println!("{table}");
    }
    if let Some(transform) = &result.transform {
        print_transform_summary(transform);
    }
}

fn print_transform_summary(outcome: &TransformOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Clean table"),
        header_cell("Rows in"),
        header_cell("Missing key"),
        header_cell("Duplicates"),
        header_cell("Orphans"),
        header_cell("Nulled"),
        header_cell("Rows out"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    let stats = [
        outcome.stats.patients,
        outcome.stats.encounters,
        outcome.stats.conditions,
    ];
    for ((name, written), stats) in outcome.materialized.tables.iter().zip(stats) {
        table.add_row(stats_row(name, *written, &stats));
    }
    println!("{table}");

    println!(
        "Readmissions: {} of {} candidate encounters",
        outcome.stats.readmissions, outcome.stats.readmission_candidates
    );
    println!("Views created: {}", outcome.materialized.views.join(", "));
}

fn stats_row(name: &str, written: usize, stats: &CleaningStats) -> Vec<Cell> {
    vec![
        name_cell(name),
        Cell::new(stats.rows_in),
        count_cell(stats.missing_key, Color::Yellow),
        count_cell(stats.duplicates, Color::Yellow),
        count_cell(stats.orphans, Color::Red),
        count_cell(stats.coerced_to_null, Color::Yellow),
        Cell::new(written).add_attribute(Attribute::Bold),
    ]
}

pub fn print_report(months: &[ReadmitMonth], top: &[TopCondition]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Month"), header_cell("Readmit rate")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for month in months {
        table.add_row(vec![
            name_cell(&month.month_start.format("%Y-%m").to_string()),
            Cell::new(format!("{:.1}%", month.readmit_rate * 100.0)),
        ]);
    }
    if months.is_empty() {
        table.add_row(vec![dim_cell("(no encounters)"), dim_cell("-")]);
    }
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec![header_cell("Condition"), header_cell("Patients")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for condition in top {
        let name = match &condition.condition_name {
            Some(name) => name_cell(name),
            None => dim_cell("(unnamed)"),
        };
        table.add_row(vec![name, Cell::new(condition.patients)]);
    }
    if top.is_empty() {
        table.add_row(vec![dim_cell("(no conditions)"), dim_cell("-")]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.apply_modifier(UTF8_SOLID_INNER_BORDERS);
    table.set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn name_cell(name: &str) -> Cell {
    Cell::new(name).fg(Color::Green)
}

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell("0")
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
