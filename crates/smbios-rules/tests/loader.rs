use std::io::Write;

use smbios_rules::{RulesError, load_default_rules, load_rules, parse_rules, resolve_rules_path};

const RULES: &str = r#"
[[type_rule]]
type = 4
count = 2

[[type_rule.rule]]
field = ["Socket Designation"]
validations = { regexp = '(CPU|P)\d+' }

[[type_rule.rule]]
field = ["Core Count", "Thread Count"]
validations = { regexp = '^\d+$' }

[[type_rule.conditional_rule]]
condition = [{ field = ["Status"], validations = { in_list = ["Populated, Enabled"] } }]
rule = [{ field = ["Version"] }]

[[type_rule]]
type = 41

[[type_rule.rule]]
field = ["Device"]
item_rule = [
    { field = ["Slot", "Bus"], validations = { regexp = '^\d+$' } },
    { field = ["Name"] },
]

[[type_rule]]
type = 127
count = 1
"#;

#[test]
fn parses_type_rules_in_file_order() {
    let rules = parse_rules(RULES).expect("parse rules");
    let types: Vec<u8> = rules.type_rules().iter().map(|r| r.table_type).collect();
    assert_eq!(types, [4, 41, 127]);

    let processor = rules.type_rule(4).expect("type 4 rule");
    assert_eq!(processor.count, 2);
    let fields: Vec<&str> = processor.rules.iter().map(|r| r.field.as_str()).collect();
    assert_eq!(fields, ["Socket Designation", "Core Count", "Thread Count"]);
    assert_eq!(processor.conditional_rules.len(), 1);
    assert_eq!(processor.conditional_rules[0].condition[0].field, "Status");
    assert!(processor.conditional_rules[0].rules[0].validations.is_presence_only());
}

#[test]
fn nested_item_rules_expand_per_field() {
    let rules = parse_rules(RULES).expect("parse rules");
    let device = &rules.type_rule(41).expect("type 41 rule").rules[0];
    let nested: Vec<&str> = device.item_rules.iter().map(|r| r.field.as_str()).collect();
    assert_eq!(nested, ["Slot", "Bus", "Name"]);
}

#[test]
fn empty_type_rule_is_skipped_but_counted() {
    let rules = parse_rules(RULES).expect("parse rules");
    assert!(rules.type_rule(127).is_none());
    assert!(rules.type_rule(0).is_none());
    assert_eq!(rules.required_counts().get(&127), Some(&1));
}

#[test]
fn duplicate_type_uses_first_rules_and_last_count() {
    let text = r#"
[[type_rule]]
type = 3
count = 1
rule = [{ field = ["Manufacturer"] }]

[[type_rule]]
type = 3
count = 5
rule = [{ field = ["Lock"] }]
"#;
    let rules = parse_rules(text).expect("parse rules");
    assert_eq!(rules.type_rule(3).unwrap().rules[0].field, "Manufacturer");
    assert_eq!(rules.required_counts().get(&3), Some(&5));
}

#[test]
fn invalid_pattern_is_a_load_error() {
    let text = r#"
[[type_rule]]
type = 0
rule = [{ field = ["Vendor"], validations = { regexp = "([unclosed" } }]
"#;
    let err = parse_rules(text).unwrap_err();
    match err {
        RulesError::InvalidPattern {
            table_type,
            field,
            pattern,
            ..
        } => {
            assert_eq!(table_type, 0);
            assert_eq!(field, "Vendor");
            assert_eq!(pattern, "([unclosed");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_field_list_is_rejected() {
    let text = r#"
[[type_rule]]
type = 2
rule = [{ field = [] }]
"#;
    let err = parse_rules(text).unwrap_err();
    assert!(matches!(err, RulesError::EmptyFieldList { table_type: 2 }));
}

#[test]
fn unknown_keys_are_rejected() {
    let text = r#"
[[type_rule]]
type = 2
rule = [{ field = ["Manufacturer"], validations = { regex = "x" } }]
"#;
    assert!(matches!(parse_rules(text), Err(RulesError::Parse(_))));
}

#[test]
fn load_rules_reports_path_on_toml_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"[[type_rule]]\ntype = \"zero\"\n")
        .expect("write rules");
    let err = load_rules(file.path()).unwrap_err();
    assert!(matches!(err, RulesError::Toml { .. }));
}

#[test]
fn load_rules_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(RULES.as_bytes()).expect("write rules");
    let rules = load_rules(file.path()).expect("load rules");
    assert_eq!(rules.len(), 3);
}

#[test]
fn explicit_rules_path_wins() {
    let explicit = std::path::Path::new("custom.toml");
    assert_eq!(resolve_rules_path(Some(explicit)), explicit);
}

#[test]
fn bundled_default_rules_compile() {
    let rules = load_default_rules().expect("load bundled rules");
    assert!(rules.type_rule(0).is_some());
    assert!(rules.type_rule(17).is_some());
    assert_eq!(rules.required_counts().get(&4), Some(&1));
}
