//! Field value is a handle to a table of the required type.

use smbios_model::{Field, Issue, NOT_PROVIDED, RecordSet};

pub fn check(field: &Field, records: &RecordSet, expected: u8) -> Vec<Issue> {
    if field.value == NOT_PROVIDED {
        return Vec::new();
    }
    let Some(target) = records.get(&field.value) else {
        return vec![Issue::HandleNotFound {
            handle: field.value.clone(),
        }];
    };
    if target.table_type != expected {
        return vec![Issue::HandleWrongType {
            handle: field.value.clone(),
            actual: target.table_type,
            expected,
        }];
    }
    Vec::new()
}
