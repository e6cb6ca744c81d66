//! Validation issues and their transcript messages.

use serde::{Deserialize, Serialize};

/// Pattern a cross-reference item must contain to count as a handle.
pub const HANDLE_PATTERN: &str = "0[xX][0-9a-fA-F]{4}";

/// Broad class of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Field absent, or present with only the bad-index marker
    FieldMissing,
    /// Pattern, allowed-list or forbidden-substring failure
    ValueMismatch,
    /// Item count, duplicate group or malformed nested item
    StructuralMismatch,
    /// Cross-reference handle absent, malformed or of the wrong type
    ReferenceBroken,
    /// Fewer tables of a type than the rules require
    TableCount,
}

impl IssueKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FieldMissing => "Field missing",
            Self::ValueMismatch => "Value mismatch",
            Self::StructuralMismatch => "Structural mismatch",
            Self::ReferenceBroken => "Reference broken",
            Self::TableCount => "Table count",
        }
    }
}

/// One failed check. Variants carry what their message needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Issue {
    // Presence
    /// Field is not in the record
    FieldMissing,
    /// Field exists but holds only the bad-index marker
    ValueAndItemsMissing { value: String },

    // Value checks
    /// Value does not match the configured pattern
    PatternMismatch { value: String, pattern: String },
    /// Value is not one of the allowed strings
    NotInList { value: String, allowed: Vec<String> },
    /// Value contains one of the forbidden candidates
    ContainsForbidden {
        value: String,
        forbidden: Vec<String>,
    },

    // Item list structure
    /// Item count value is not an integer
    NotANumber { value: String },
    /// Item count times group size differs from the item list length
    ItemCountMismatch {
        value: String,
        count: i64,
        groups: usize,
    },
    /// Two item groups concatenate to the same text
    DuplicateItemGroup { group: String },
    /// Nested item is not a `name: value` pair
    MalformedItem { item: String },
    /// Nested item name repeats within one item list
    DuplicateItemField { name: String },

    // Cross-references
    /// Referenced handle does not exist
    HandleNotFound { handle: String },
    /// Referenced handle exists with a different table type
    HandleWrongType {
        handle: String,
        actual: u8,
        expected: u8,
    },
    /// Handle list entry does not look like a handle
    MalformedHandle { value: String, handle: String },
    /// Handle list entry names a handle absent from the table
    ListedHandleNotFound { value: String, handle: String },

    // Whole-table checks
    /// Fewer tables of a type than required
    TableCountShortfall {
        table_type: u8,
        required: u32,
        actual: usize,
    },
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::FieldMissing | Issue::ValueAndItemsMissing { .. } => IssueKind::FieldMissing,
            Issue::PatternMismatch { .. }
            | Issue::NotInList { .. }
            | Issue::ContainsForbidden { .. } => IssueKind::ValueMismatch,
            Issue::NotANumber { .. }
            | Issue::ItemCountMismatch { .. }
            | Issue::DuplicateItemGroup { .. }
            | Issue::MalformedItem { .. }
            | Issue::DuplicateItemField { .. } => IssueKind::StructuralMismatch,
            Issue::HandleNotFound { .. }
            | Issue::HandleWrongType { .. }
            | Issue::MalformedHandle { .. }
            | Issue::ListedHandleNotFound { .. } => IssueKind::ReferenceBroken,
            Issue::TableCountShortfall { .. } => IssueKind::TableCount,
        }
    }

    /// Field value the issue was raised against, as shown in the transcript.
    ///
    /// Item-level issues report an empty value.
    pub fn value(&self) -> &str {
        match self {
            Issue::ValueAndItemsMissing { value }
            | Issue::PatternMismatch { value, .. }
            | Issue::NotInList { value, .. }
            | Issue::ContainsForbidden { value, .. }
            | Issue::NotANumber { value }
            | Issue::ItemCountMismatch { value, .. }
            | Issue::MalformedHandle { value, .. }
            | Issue::ListedHandleNotFound { value, .. } => value,
            Issue::HandleNotFound { handle } | Issue::HandleWrongType { handle, .. } => handle,
            Issue::FieldMissing
            | Issue::DuplicateItemGroup { .. }
            | Issue::MalformedItem { .. }
            | Issue::DuplicateItemField { .. }
            | Issue::TableCountShortfall { .. } => "",
        }
    }

    /// Diagnostic text.
    pub fn message(&self) -> String {
        match self {
            Issue::FieldMissing => "Field is missing from the table".to_string(),
            Issue::ValueAndItemsMissing { .. } => {
                "Field is found but value and item are missing".to_string()
            }
            Issue::PatternMismatch { value, pattern } => {
                format!("{value} doesn't match regex {pattern}")
            }
            Issue::NotInList { value, allowed } => {
                format!("{value} is not in {}", format_list(allowed))
            }
            Issue::ContainsForbidden { value, forbidden } => {
                format!("{value} contains {}", format_list(forbidden))
            }
            Issue::NotANumber { value } => format!("{value} is not a number"),
            Issue::ItemCountMismatch { count, groups, .. } => {
                format!("item count {count} doesn't match number of items {groups}")
            }
            Issue::DuplicateItemGroup { group } => format!("{group} is duplicated"),
            Issue::MalformedItem { item } => format!("{item:?} is not in field:val format"),
            Issue::DuplicateItemField { name } => {
                format!("duplicate field {name:?} in item list")
            }
            Issue::HandleNotFound { handle } => {
                format!("Handle {handle} not found in SMBIOS table")
            }
            Issue::HandleWrongType {
                handle,
                actual,
                expected,
            } => format!("{handle}(Type {actual}) is not type {expected}"),
            Issue::MalformedHandle { handle, .. } => {
                format!("{handle} doesn't match handle pattern {HANDLE_PATTERN}")
            }
            Issue::ListedHandleNotFound { handle, .. } => {
                format!("Handle {handle} not found in the SMBIOS table")
            }
            Issue::TableCountShortfall {
                table_type,
                required,
                actual,
            } => format!("Not enough table type {table_type}. Required: {required}, Got {actual}"),
        }
    }
}

/// Space-separated bracketed list, e.g. `[Present Not Present]`.
fn format_list(values: &[String]) -> String {
    format!("[{}]", values.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_value_and_pattern() {
        let issue = Issue::PatternMismatch {
            value: "Acme123!".to_string(),
            pattern: "^[A-Za-z]+$".to_string(),
        };
        assert_eq!(issue.message(), "Acme123! doesn't match regex ^[A-Za-z]+$");
        assert_eq!(issue.value(), "Acme123!");
        assert_eq!(issue.kind(), IssueKind::ValueMismatch);
    }

    #[test]
    fn list_messages_use_bracket_form() {
        let issue = Issue::NotInList {
            value: "Tower".to_string(),
            allowed: vec!["Main Server Chassis".to_string(), "Rack Mount Chassis".to_string()],
        };
        assert_eq!(
            issue.message(),
            "Tower is not in [Main Server Chassis Rack Mount Chassis]"
        );
    }

    #[test]
    fn quoted_item_messages() {
        let issue = Issue::MalformedItem {
            item: "no colon".to_string(),
        };
        assert_eq!(issue.message(), "\"no colon\" is not in field:val format");
        assert_eq!(issue.value(), "");
        assert_eq!(issue.kind(), IssueKind::StructuralMismatch);
    }

    #[test]
    fn table_count_message() {
        let issue = Issue::TableCountShortfall {
            table_type: 4,
            required: 2,
            actual: 1,
        };
        assert_eq!(issue.message(), "Not enough table type 4. Required: 2, Got 1");
        assert_eq!(issue.kind(), IssueKind::TableCount);
    }
}
