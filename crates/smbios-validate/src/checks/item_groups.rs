//! Grouped item uniqueness.
//!
//! The field value is a group count. The item list must hold exactly
//! `count * group_size` lines, and the concatenation of each consecutive
//! group must be unique.

use std::collections::HashSet;

use smbios_model::{Field, Issue};

pub fn check(field: &Field, group_size: usize) -> Vec<Issue> {
    let Ok(count) = field.value.parse::<i64>() else {
        return vec![Issue::NotANumber {
            value: field.value.clone(),
        }];
    };
    let expected = i64::try_from(group_size)
        .ok()
        .and_then(|size| count.checked_mul(size));
    if expected != i64::try_from(field.items.len()).ok() {
        return vec![Issue::ItemCountMismatch {
            value: field.value.clone(),
            count,
            groups: field.items.len() / group_size,
        }];
    }

    let mut seen = HashSet::new();
    field
        .items
        .chunks(group_size)
        .map(|group| group.concat())
        .filter_map(|group| {
            if seen.contains(&group) {
                Some(Issue::DuplicateItemGroup { group })
            } else {
                seen.insert(group);
                None
            }
        })
        .collect()
}
