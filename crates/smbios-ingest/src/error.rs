#![deny(unsafe_code)]

use std::path::PathBuf;

use smbios_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: malformed record header {text:?}")]
    InvalidHeader { line: usize, text: String },

    #[error("line {line}: unexpected indentation depth {depth}")]
    UnexpectedIndent { line: usize, depth: usize },

    #[error("line {line}: list item {text:?} has no field to attach to")]
    ItemWithoutField { line: usize, text: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
