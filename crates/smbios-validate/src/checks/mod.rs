//! Validation check modules.
//!
//! Each module performs one independent check against a field that is already
//! known to be present. A check passes exactly when it returns no issues.

mod handle_presence;
mod handle_type;
mod in_list;
mod item_groups;
mod not_contain;
mod pattern;

use smbios_model::{Field, Issue, RecordSet};
use smbios_rules::Validations;

/// Run every configured check on a field, in a fixed order.
pub fn run_all(validations: &Validations, field: &Field, records: &RecordSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Pattern match
    if let Some(pattern) = &validations.regexp {
        issues.extend(pattern::check(field, pattern));
    }

    // 2. Allowed values
    if let Some(allowed) = &validations.in_list {
        issues.extend(in_list::check(field, allowed));
    }

    // 3. Forbidden fragments
    if let Some(forbidden) = &validations.not_contain {
        issues.extend(not_contain::check(field, forbidden));
    }

    // 4. Grouped item uniqueness
    if let Some(group_size) = validations.item_count_unique {
        issues.extend(item_groups::check(field, group_size));
    }

    // 5. Handle of the required type
    if let Some(expected) = validations.handle_type {
        issues.extend(handle_type::check(field, records, expected));
    }

    // 6. Every listed handle exists
    if validations.handles_presence {
        issues.extend(handle_presence::check(field, records));
    }

    issues
}
