use proptest::prelude::*;

use smbios_model::{Field, Record, RecordSet};
use smbios_rules::parse_rules;
use smbios_validate::{evaluate_field_rule, validate};

const RULES: &str = r#"
[[type_rule]]
type = 2
count = 1

[[type_rule.rule]]
field = ["Product Name"]
validations = { regexp = '^[A-Z][A-Za-z0-9 ]*$', not_contain = ["Default"] }

[[type_rule.rule]]
field = ["Contained Object Handles"]
validations = { item_count_unique = 1 }
"#;

proptest! {
    #[test]
    fn compliant_iff_no_findings(
        name in "[A-Za-z0-9 ]{0,12}",
        items in prop::collection::vec("[a-c]", 0..4),
        count in 0usize..5,
    ) {
        let rules = parse_rules(RULES).unwrap();
        let record = Record::new("0x0200", 2)
            .with_field("Product Name", Field::new(name))
            .with_field(
                "Contained Object Handles",
                Field::with_items(count.to_string(), items),
            );
        let set = RecordSet::from_records([record]).unwrap();

        let report = validate(&set, &rules);
        prop_assert_eq!(report.is_compliant(), report.finding_count() == 0);
        for record in &report.records {
            prop_assert_eq!(record.compliant, record.findings.is_empty());
        }
    }

    #[test]
    fn passing_values_yield_no_findings(
        name in "[A-Z][A-Za-z0-9 ]{0,12}",
        items in prop::collection::btree_set("0x[0-9A-F]{4}", 0..6),
    ) {
        prop_assume!(!name.contains("Default"));
        let rules = parse_rules(RULES).unwrap();
        let record = Record::new("0x0200", 2)
            .with_field("Product Name", Field::new(name))
            .with_field(
                "Contained Object Handles",
                Field::with_items(items.len().to_string(), items),
            );
        let set = RecordSet::from_records([record]).unwrap();

        let report = validate(&set, &rules);
        prop_assert!(report.is_compliant());
        prop_assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn missing_field_always_yields_one_finding(field in "[A-Z][a-z]{1,10}") {
        let rules = parse_rules(RULES).unwrap();
        let type_rule = rules.type_rule(2).unwrap();
        let record = Record::new("0x0200", 2).with_field(field, Field::new("x"));
        for rule in &type_rule.rules {
            if record.has_field(&rule.field) {
                continue;
            }
            let outcome = evaluate_field_rule(rule, &record, &RecordSet::new());
            prop_assert!(!outcome.passed);
            prop_assert_eq!(outcome.findings.len(), 1);
        }
    }
}
