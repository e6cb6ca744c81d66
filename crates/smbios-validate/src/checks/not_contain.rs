//! Value must not contain any forbidden candidate.
//!
//! Candidates are regex fragments: `O.E.M` also rejects `OxEyM`.

use smbios_model::{Field, Issue};
use smbios_rules::NotContain;

pub fn check(field: &Field, forbidden: &NotContain) -> Vec<Issue> {
    if !forbidden
        .patterns
        .iter()
        .any(|pattern| pattern.is_match(&field.value))
    {
        return Vec::new();
    }
    vec![Issue::ContainsForbidden {
        value: field.value.clone(),
        forbidden: forbidden.candidates.clone(),
    }]
}
