use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{info, info_span};

use smbios_model::ComplianceReport;
use smbios_rules::{RuleSet, load_rules, resolve_rules_path};

use crate::cli::{CheckArgs, RulesArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

/// Result of a `check` run, ready for rendering.
pub struct CheckResult {
    pub report: ComplianceReport,
    pub rule_path: PathBuf,
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let span = info_span!("check", table = %args.table.display());
    let _guard = span.enter();
    let start = Instant::now();

    let records = smbios_ingest::parse_file(&args.table)
        .with_context(|| format!("parse dmidecode dump {}", args.table.display()))?;
    let (rules, rule_path) = load(args.rules.as_deref())?;

    let report = smbios_validate::validate(&records, &rules);
    info!(
        compliant = report.is_compliant(),
        findings = report.finding_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "check finished"
    );
    Ok(CheckResult { report, rule_path })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let (rules, rule_path) = load(args.rules.as_deref())?;
    println!("Rule: {}", rule_path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Count"),
        header_cell("Rules"),
        header_cell("Conditional"),
        header_cell("Fields"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for type_rule in rules.type_rules() {
        let fields: Vec<&str> = type_rule
            .rules
            .iter()
            .map(|rule| rule.field.as_str())
            .collect();
        let fields_cell = if fields.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(fields.join(", "))
        };
        table.add_row(vec![
            Cell::new(type_rule.table_type),
            Cell::new(type_rule.count),
            Cell::new(type_rule.rules.len()),
            Cell::new(type_rule.conditional_rules.len()),
            fields_cell,
        ]);
    }
    println!("{table}");
    Ok(())
}

fn load(explicit: Option<&Path>) -> Result<(RuleSet, PathBuf)> {
    let rule_path = resolve_rules_path(explicit);
    let rules = load_rules(&rule_path)
        .with_context(|| format!("load rules {}", rule_path.display()))?;
    Ok((rules, rule_path))
}
