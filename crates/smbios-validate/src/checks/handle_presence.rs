//! Every item names a handle that exists in the table.
//!
//! Items may carry an annotation after the handle, e.g.
//! `0x0011 (Memory Device)`; only the text before the first space is checked.
//! A malformed entry is reported and checking continues. A well-formed handle
//! that is absent stops the scan.

use std::sync::LazyLock;

use regex::Regex;

use smbios_model::{Field, HANDLE_PATTERN, Issue, RecordSet};

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HANDLE_PATTERN).expect("valid handle regex"));

pub fn check(field: &Field, records: &RecordSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    for item in &field.items {
        let handle = item.split_once(' ').map_or(item.as_str(), |(head, _)| head);
        if !HANDLE_RE.is_match(handle) {
            issues.push(Issue::MalformedHandle {
                value: field.value.clone(),
                handle: handle.to_string(),
            });
            continue;
        }
        if !records.contains(handle) {
            issues.push(Issue::ListedHandleNotFound {
                value: field.value.clone(),
                handle: handle.to_string(),
            });
            break;
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use smbios_model::Record;

    use super::*;

    fn records() -> RecordSet {
        RecordSet::from_records([Record::new("0x0010", 17), Record::new("0x0011", 17)]).unwrap()
    }

    #[test]
    fn strips_annotation_after_handle() {
        let field = Field::with_items("2", ["0x0010 (Memory Device)", "0x0011"]);
        assert!(check(&field, &records()).is_empty());
    }

    #[test]
    fn malformed_entry_does_not_stop_scan() {
        let field = Field::with_items("3", ["bogus", "0x0099", "0x0010"]);
        let issues = check(&field, &records());
        assert_eq!(issues.len(), 2);
        assert!(matches!(&issues[0], Issue::MalformedHandle { handle, .. } if handle == "bogus"));
        assert!(
            matches!(&issues[1], Issue::ListedHandleNotFound { handle, .. } if handle == "0x0099")
        );
    }

    #[test]
    fn missing_handle_stops_scan() {
        let field = Field::with_items("3", ["0x0099", "bogus", "0x0098"]);
        let issues = check(&field, &records());
        assert_eq!(issues.len(), 1);
    }
}
