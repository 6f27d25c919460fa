use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use enc_model::{CheckKind, EncounterRecord, FlaggedTable};

use enc_cli::types::{PREVIEW_ROWS, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    match &result.outputs {
        Some(_) => println!("Output: {}", result.output_dir.display()),
        None => println!("Output: none (dry run)"),
    }
    println!();
    print!("{}", result.report.render());
    println!();

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Flagged"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table, 100);
    align_column(&mut table, 1, CellAlignment::Right);
    let flagged = &result.outcome.flagged;
    table.add_row(vec![
        check_cell(CheckKind::NegativeCost),
        count_cell(flagged.count_by_check(CheckKind::NegativeCost), Color::Red),
        Cell::new("total_cost < 0"),
    ]);
    table.add_row(vec![
        check_cell(CheckKind::HighEncounterCount),
        count_cell(
            flagged.count_by_check(CheckKind::HighEncounterCount),
            Color::Yellow,
        ),
        Cell::new(format!(
            "total_encounters > p{:.0}",
            result.percentile * 100.0
        )),
    ]);
    table.add_row(vec![
        Cell::new("grain")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        count_cell(result.grain.len(), Color::Yellow),
        dim_cell("issues logged, rows kept"),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(flagged.len()).add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} of {} rows clean",
            result.outcome.cleaned.len(),
            result.analytics.len()
        ))
        .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_preview_table(result.preview());
    print_flagged_table(flagged);
}

fn print_preview_table(records: &[EncounterRecord]) {
    println!();
    println!("Analytics summary (first {PREVIEW_ROWS} rows):");
    if records.is_empty() {
        println!("  No rows.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Patient"),
        header_cell("Facility"),
        header_cell("Month"),
        header_cell("Encounters"),
        header_cell("Cost"),
        header_cell("Diagnoses"),
    ]);
    apply_table_style(&mut table, 120);
    for index in 3..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for record in records {
        table.add_row(vec![
            Cell::new(&record.patient_id),
            Cell::new(&record.facility_id),
            Cell::new(&record.year_month),
            Cell::new(record.total_encounters),
            Cell::new(format!("{:.2}", record.total_cost)),
            Cell::new(record.distinct_diagnosis_count),
        ]);
    }
    println!("{table}");
}

fn print_flagged_table(flagged: &FlaggedTable) {
    println!();
    println!("Flagged records:");
    if flagged.is_empty() {
        println!("  No records flagged.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Patient"),
        header_cell("Facility"),
        header_cell("Month"),
        header_cell("Encounters"),
        header_cell("Cost"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table, 140);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for row in flagged {
        let record = &row.record;
        let cost = if record.total_cost < 0.0 {
            Cell::new(format!("{:.2}", record.total_cost)).fg(Color::Red)
        } else {
            Cell::new(format!("{:.2}", record.total_cost))
        };
        table.add_row(vec![
            Cell::new(&record.patient_id),
            Cell::new(&record.facility_id),
            Cell::new(&record.year_month),
            Cell::new(record.total_encounters),
            cost,
            Cell::new(row.flag_reason()),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn check_cell(check: CheckKind) -> Cell {
    Cell::new(check.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
