#![deny(unsafe_code)]

pub mod error;
pub mod issue;
pub mod record;
pub mod report;

pub use error::{ModelError, Result};
pub use issue::{HANDLE_PATTERN, Issue, IssueKind};
pub use record::{BAD_INDEX, Field, NOT_PROVIDED, Record, RecordSet};
pub use report::{ComplianceReport, Finding, RecordReport};
