//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid theme: {0} (expected one of: classic, modern, boho)")]
    InvalidTheme(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown party group: {0}")]
    UnknownPartyGroup(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
