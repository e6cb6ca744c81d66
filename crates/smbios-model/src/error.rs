use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate handle {handle} in record set")]
    DuplicateHandle { handle: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
