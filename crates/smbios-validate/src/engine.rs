//! Rule evaluation for single records.
//!
//! Every evaluation returns its findings as a value. The rule tree is never
//! written to, so one rule set can be applied to any number of records.

use std::collections::BTreeMap;

use tracing::{debug, debug_span};

use smbios_model::{Field, Finding, Issue, Record, RecordReport, RecordSet};
use smbios_rules::{FieldRule, TypeRule};

use crate::checks;

/// Pass/fail plus the findings gathered while evaluating one or more rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub passed: bool,
    pub findings: Vec<Finding>,
}

impl RuleOutcome {
    fn pass() -> Self {
        Self {
            passed: true,
            findings: Vec::new(),
        }
    }

    /// Fold another outcome in: conjunction of verdicts, concatenation of findings.
    fn merge(&mut self, other: RuleOutcome) {
        self.passed &= other.passed;
        self.findings.extend(other.findings);
    }
}

/// Evaluate one field rule against a record.
///
/// 1. Presence gate: a missing field, or one holding only the bad-index
///    marker, yields exactly one finding and no further checks.
/// 2. Every configured check runs on the field.
/// 3. With item rules, the items are read as `name: value` pairs and each
///    item rule is evaluated against them the same way.
pub fn evaluate_field_rule(rule: &FieldRule, record: &Record, records: &RecordSet) -> RuleOutcome {
    let finding = |issue: Issue| Finding::field(&record.handle, record.table_type, &rule.field, issue);

    let Some(field) = record.field(&rule.field) else {
        return fail_with(finding(Issue::FieldMissing));
    };
    if field.is_bad_index() {
        return fail_with(finding(Issue::ValueAndItemsMissing {
            value: field.value.clone(),
        }));
    }

    let issues = checks::run_all(&rule.validations, field, records);
    let mut outcome = RuleOutcome {
        passed: issues.is_empty(),
        findings: issues.into_iter().map(finding).collect(),
    };

    if !rule.item_rules.is_empty() {
        let items = match item_record(record, field) {
            Ok(items) => items,
            Err(issue) => {
                outcome.passed = false;
                outcome.findings.push(finding(issue));
                return outcome;
            }
        };
        outcome.merge(evaluate_rules(&rule.item_rules, &items, records));
    }

    if !outcome.passed {
        debug!(
            handle = %record.handle,
            field = %rule.field,
            findings = outcome.findings.len(),
            "field rule failed"
        );
    }
    outcome
}

/// Evaluate a list of field rules; every rule runs regardless of earlier failures.
pub fn evaluate_rules(rules: &[FieldRule], record: &Record, records: &RecordSet) -> RuleOutcome {
    let mut outcome = RuleOutcome::pass();
    for rule in rules {
        outcome.merge(evaluate_field_rule(rule, record, records));
    }
    outcome
}

/// Evaluate a type rule, including conditional rules, against one record.
///
/// A conditional rule whose condition fails is skipped entirely. Findings from
/// condition rules themselves are never reported.
pub fn validate_record(type_rule: &TypeRule, record: &Record, records: &RecordSet) -> RecordReport {
    let span = debug_span!("record", handle = %record.handle, table_type = record.table_type);
    let _guard = span.enter();

    let mut outcome = evaluate_rules(&type_rule.rules, record, records);
    for (idx, conditional) in type_rule.conditional_rules.iter().enumerate() {
        if !evaluate_rules(&conditional.condition, record, records).passed {
            debug!(conditional = idx, "condition not met, skipping");
            continue;
        }
        outcome.merge(evaluate_rules(&conditional.rules, record, records));
    }

    RecordReport {
        handle: record.handle.clone(),
        table_type: record.table_type,
        compliant: outcome.passed,
        findings: outcome.findings,
    }
}

/// Build the transient record the item rules of a field are evaluated against.
///
/// Each item is split at its first colon; the value is trimmed.
fn item_record(parent: &Record, field: &Field) -> Result<Record, Issue> {
    let mut fields = BTreeMap::new();
    for item in &field.items {
        let Some((name, value)) = item.split_once(':') else {
            return Err(Issue::MalformedItem { item: item.clone() });
        };
        if fields.contains_key(name) {
            return Err(Issue::DuplicateItemField {
                name: name.to_string(),
            });
        }
        fields.insert(name.to_string(), Field::new(value.trim()));
    }
    Ok(Record {
        handle: parent.handle.clone(),
        table_type: parent.table_type,
        fields,
    })
}

fn fail_with(finding: Finding) -> RuleOutcome {
    RuleOutcome {
        passed: false,
        findings: vec![finding],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_record_splits_at_first_colon() {
        let parent = Record::new("0x0040", 41);
        let field = Field::with_items("", ["Bus: 0000:3b:00.0", "Name:  NIC0 "]);
        let items = item_record(&parent, &field).unwrap();
        assert_eq!(items.handle, "0x0040");
        assert_eq!(items.field("Bus").unwrap().value, "0000:3b:00.0");
        assert_eq!(items.field("Name").unwrap().value, "NIC0");
    }

    #[test]
    fn empty_rule_list_passes() {
        let outcome = evaluate_rules(&[], &Record::new("0x0000", 0), &RecordSet::new());
        assert_eq!(outcome, RuleOutcome::pass());
        assert!(outcome.passed);
    }

    #[test]
    fn item_record_rejects_repeated_name() {
        let parent = Record::new("0x0040", 41);
        let field = Field::with_items("", ["Name: a", "Name: b"]);
        assert_eq!(
            item_record(&parent, &field).unwrap_err(),
            Issue::DuplicateItemField {
                name: "Name".to_string()
            }
        );
    }
}
