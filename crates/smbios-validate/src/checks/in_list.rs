//! Value must equal one of the allowed strings exactly.

use smbios_model::{Field, Issue};

pub fn check(field: &Field, allowed: &[String]) -> Vec<Issue> {
    if allowed.iter().any(|candidate| *candidate == field.value) {
        return Vec::new();
    }
    vec![Issue::NotInList {
        value: field.value.clone(),
        allowed: allowed.to_vec(),
    }]
}
