#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML rule file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse TOML rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("type {table_type}, field {field:?}: invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        table_type: u8,
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("type {table_type}, field {field:?}: item_count_unique must be at least 1")]
    InvalidGroupSize { table_type: u8, field: String },

    #[error("type {table_type}: rule entry lists no field names")]
    EmptyFieldList { table_type: u8 },
}

impl RulesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
