//! Rendering of a [`ComplianceReport`] for the terminal and for machines.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use smbios_model::{ComplianceReport, RecordReport};

const UNDERLINE: &str = "\x1b[4m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Render the compliance transcript.
///
/// One block per failing record, then table-count shortfalls, then the rule
/// path and the overall verdict. `color` adds ANSI underline to record headers
/// and red to error lines.
pub fn render_text(report: &ComplianceReport, rule_path: &Path, color: bool) -> String {
    let mut out = String::new();
    for record in report.failing_records() {
        write_record(&mut out, record, color);
    }
    for finding in &report.table_counts {
        let _ = writeln!(out, "{}", finding.message());
    }
    let _ = writeln!(out, "Rule: {}", rule_path.display());
    let _ = writeln!(out, "Compliance: {}", report.is_compliant());
    out
}

fn write_record(out: &mut String, record: &RecordReport, color: bool) {
    let header = format!("Handle ID: {}, Type {}", record.handle, record.table_type);
    let _ = writeln!(out, "{}", paint(&header, UNDERLINE, color));
    for finding in &record.findings {
        let _ = writeln!(
            out,
            "Field: {}, Value: {}",
            finding.field.as_deref().unwrap_or_default(),
            finding.issue.value()
        );
        let error = format!("Error: {}", finding.message());
        let _ = writeln!(out, "{}", paint(&error, RED, color));
    }
    out.push('\n');
}

fn paint(text: &str, style: &str, color: bool) -> String {
    if color {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rule: String,
    compliant: bool,
    #[serde(flatten)]
    report: &'a ComplianceReport,
}

/// Serialize the report together with the rule path and verdict.
pub fn render_json(report: &ComplianceReport, rule_path: &Path) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        rule: rule_path.display().to_string(),
        compliant: report.is_compliant(),
        report,
    })
}
