#![deny(unsafe_code)]

//! Validation of parsed SMBIOS records against a compiled rule set.

pub mod checks;
mod counts;
mod engine;

use smbios_model::{ComplianceReport, RecordSet};
use smbios_rules::RuleSet;
use tracing::info;

pub use crate::counts::check_table_counts;
pub use crate::engine::{RuleOutcome, evaluate_field_rule, evaluate_rules, validate_record};

/// Validate every record that has a type rule, then check table counts.
///
/// Records are visited in discovery order. Records whose type has no rule are
/// not reported.
pub fn validate(records: &RecordSet, rules: &RuleSet) -> ComplianceReport {
    let reports: Vec<_> = records
        .iter()
        .filter_map(|record| {
            rules
                .type_rule(record.table_type)
                .map(|type_rule| validate_record(type_rule, record, records))
        })
        .collect();
    let table_counts = check_table_counts(rules, records);

    let report = ComplianceReport {
        records: reports,
        table_counts,
    };
    info!(
        records = records.len(),
        checked = report.records.len(),
        failing = report.failing_records().count(),
        table_count_failures = report.table_counts.len(),
        compliant = report.is_compliant(),
        "validation complete"
    );
    report
}
