//! Error types for the editor

use thiserror::Error;

/// Failures reported by a persistence gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No document stored for owner {0}")]
    NotFound(String),

    #[error("Save rejected: {0}")]
    Rejected(String),

    #[error("Store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for EditorError {
    fn from(e: tokio::task::JoinError) -> Self {
        EditorError::Task(e.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
