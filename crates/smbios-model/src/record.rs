//! Parsed SMBIOS records.
//!
//! A [`RecordSet`] is the snapshot the validator works on: every record keyed
//! by handle, plus the order in which the handles were discovered.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Value dmidecode prints when a string index points outside the string table.
pub const BAD_INDEX: &str = "<BAD INDEX>";

/// Value of an optional handle field that the firmware left unset.
pub const NOT_PROVIDED: &str = "Not Provided";

/// A single named value inside a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Scalar value printed after the colon.
    pub value: String,
    /// Indented list lines attached to the field, in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

impl Field {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items<I, S>(value: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the field carries nothing but the bad-index marker.
    pub fn is_bad_index(&self) -> bool {
        self.value == BAD_INDEX && self.items.is_empty()
    }
}

/// One SMBIOS structure as printed by dmidecode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub handle: String,
    pub table_type: u8,
    pub fields: BTreeMap<String, Field>,
}

impl Record {
    pub fn new(handle: impl Into<String>, table_type: u8) -> Self {
        Self {
            handle: handle.into(),
            table_type,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion, mostly for tests and synthetic records.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// All records of one dump, in handle-discovery order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    handles: Vec<String>,
    records: HashMap<String, Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from records in discovery order, rejecting repeated handles.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut set = Self::new();
        for record in records {
            set.insert(record)?;
        }
        Ok(set)
    }

    /// Append a record. Handles must be unique within the set.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        if self.records.contains_key(&record.handle) {
            return Err(ModelError::DuplicateHandle {
                handle: record.handle,
            });
        }
        self.handles.push(record.handle.clone());
        self.records.insert(record.handle.clone(), record);
        Ok(())
    }

    pub fn get(&self, handle: &str) -> Option<&Record> {
        self.records.get(handle)
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.records.contains_key(handle)
    }

    /// Handles in the order they were discovered.
    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    /// Records in handle-discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.handles
            .iter()
            .filter_map(|handle| self.records.get(handle))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of records with the given table type.
    pub fn count_of_type(&self, table_type: u8) -> usize {
        self.records
            .values()
            .filter(|record| record.table_type == table_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_discovery_order() {
        let set = RecordSet::from_records([
            Record::new("0x0002", 4),
            Record::new("0x0000", 0),
            Record::new("0x0001", 4),
        ])
        .unwrap();

        let order: Vec<&str> = set.iter().map(|r| r.handle.as_str()).collect();
        assert_eq!(order, ["0x0002", "0x0000", "0x0001"]);
        assert_eq!(set.count_of_type(4), 2);
        assert_eq!(set.count_of_type(17), 0);
    }

    #[test]
    fn rejects_duplicate_handle() {
        let mut set = RecordSet::new();
        set.insert(Record::new("0x0000", 0)).unwrap();
        let err = set.insert(Record::new("0x0000", 1)).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateHandle { ref handle } if handle == "0x0000"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("0x0000").unwrap().table_type, 0);
    }

    #[test]
    fn from_records_rejects_duplicate_handle() {
        let err = RecordSet::from_records([Record::new("0x0000", 0), Record::new("0x0000", 1)])
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateHandle { ref handle } if handle == "0x0000"));
    }

    #[test]
    fn bad_index_requires_empty_items() {
        assert!(Field::new(BAD_INDEX).is_bad_index());
        assert!(!Field::with_items(BAD_INDEX, ["x"]).is_bad_index());
        assert!(!Field::new("Acme").is_bad_index());
    }
}
