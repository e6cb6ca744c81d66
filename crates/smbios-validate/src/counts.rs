use smbios_model::{Finding, RecordSet};
use smbios_rules::RuleSet;
use tracing::debug;

/// Compare the number of records of each declared type with its minimum count.
///
/// Types are visited in ascending order, so the findings are ordered by type.
/// When a type is declared more than once the last declared count applies.
pub fn check_table_counts(rules: &RuleSet, records: &RecordSet) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (table_type, required) in rules.required_counts() {
        let actual = records.count_of_type(table_type);
        if actual < required as usize {
            debug!(table_type, required, actual, "table count below minimum");
            findings.push(Finding::table_count(table_type, required, actual));
        }
    }
    findings
}
