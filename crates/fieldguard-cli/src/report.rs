//! Human-readable and machine-readable rendering of command results.

use chrono::Utc;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::commands::{CheckResult, FieldReport, ReplayResult, ValidateResult};

const REPORT_SCHEMA: &str = "fieldguard.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Machine-readable validation report payload.
#[derive(Debug, Serialize)]
pub struct ValidationPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub blocked: bool,
    pub flagged: &'a [FieldReport],
}

impl<'a> ValidationPayload<'a> {
    pub fn new(result: &'a ValidateResult) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            blocked: result.blocked,
            flagged: &result.flagged,
        }
    }
}

pub fn print_check(result: &CheckResult) {
    if result.duplicates.is_empty() {
        println!("No duplicates detected ({} distinct values seen)", result.history_len);
    } else {
        let mut table = styled_table(vec!["Field", "Duplicate value"]);
        for report in &result.duplicates {
            table.add_row(vec![
                Cell::new(&report.name),
                Cell::new(&report.value).fg(Color::Red),
            ]);
        }
        println!("{table}");
    }
    if !result.levels.is_empty() {
        let mut table = styled_table(vec!["Level field", "Derived level"]);
        for level in &result.levels {
            table.add_row(vec![
                Cell::new(&level.name),
                Cell::new(&level.level).fg(Color::Green),
            ]);
        }
        println!("{table}");
    }
    for notice in &result.notices {
        println!("notice: {notice}");
    }
}

pub fn print_validate(result: &ValidateResult) {
    if !result.blocked {
        println!("Submission OK: no within-form duplicates");
        return;
    }
    let mut table = styled_table(vec!["Flagged field", "Value"]);
    for report in &result.flagged {
        table.add_row(vec![
            Cell::new(&report.name),
            Cell::new(&report.value).fg(Color::Red),
        ]);
    }
    println!("{table}");
    println!("Submission BLOCKED: {} repeated value(s)", result.flagged.len());
    for notice in &result.notices {
        println!("notice: {notice}");
    }
}

pub fn print_replay(result: &ReplayResult) {
    let mut table = styled_table(vec!["At (ms)", "Field", "Outcome"]);
    for evaluation in &result.evaluations {
        let outcome = if evaluation.duplicate {
            Cell::new("duplicate").fg(Color::Red)
        } else {
            Cell::new("unique").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(evaluation.at_ms),
            Cell::new(&evaluation.field),
            outcome,
        ]);
    }
    println!("{table}");
    println!(
        "{} evaluation(s), {} edit(s) coalesced away by the debounce window",
        result.evaluations.len(),
        result.coalesced_edits
    );
    for notice in &result.notices {
        println!("notice: {notice}");
    }
}

fn styled_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .into_iter()
            .map(|header| Cell::new(header).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}
