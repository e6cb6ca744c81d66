//! Value must match the configured pattern.

use smbios_model::{Field, Issue};
use smbios_rules::Pattern;

pub fn check(field: &Field, pattern: &Pattern) -> Vec<Issue> {
    if pattern.is_match(&field.value) {
        return Vec::new();
    }
    vec![Issue::PatternMismatch {
        value: field.value.clone(),
        pattern: pattern.source.clone(),
    }]
}
