use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// A single validation finding, attributed to a record and field when it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Handle of the record the finding belongs to; `None` for table-count findings.
    pub handle: Option<String>,
    pub table_type: u8,
    /// Field name, or the nested item name for item rules.
    pub field: Option<String>,
    pub issue: Issue,
}

impl Finding {
    pub fn field(
        handle: impl Into<String>,
        table_type: u8,
        field: impl Into<String>,
        issue: Issue,
    ) -> Self {
        Self {
            handle: Some(handle.into()),
            table_type,
            field: Some(field.into()),
            issue,
        }
    }

    /// Shortfall of tables of one type; carries no handle or field.
    pub fn table_count(table_type: u8, required: u32, actual: usize) -> Self {
        Self {
            handle: None,
            table_type,
            field: None,
            issue: Issue::TableCountShortfall {
                table_type,
                required,
                actual,
            },
        }
    }

    pub fn message(&self) -> String {
        self.issue.message()
    }
}

/// Outcome of validating one record against its type rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReport {
    pub handle: String,
    pub table_type: u8,
    pub compliant: bool,
    pub findings: Vec<Finding>,
}

/// Outcome of one validation session over a whole record set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// One entry per record that had a type rule, in discovery order.
    pub records: Vec<RecordReport>,
    /// Table-count shortfalls, ordered by table type.
    pub table_counts: Vec<Finding>,
}

impl ComplianceReport {
    pub fn is_compliant(&self) -> bool {
        self.records.iter().all(|record| record.compliant) && self.table_counts.is_empty()
    }

    pub fn failing_records(&self) -> impl Iterator<Item = &RecordReport> {
        self.records.iter().filter(|record| !record.compliant)
    }

    /// All findings in emission order: record blocks first, then table counts.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.records
            .iter()
            .flat_map(|record| record.findings.iter())
            .chain(self.table_counts.iter())
    }

    pub fn finding_count(&self) -> usize {
        self.findings().count()
    }
}
