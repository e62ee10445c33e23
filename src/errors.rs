//! Error types for board operations

use thiserror::Error;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Missing or malformed identifiers, rejected before any storage call
    #[error("validation error: {0}")]
    Validation(String),

    /// Target slot already occupied at write time
    #[error("slot conflict: {0}")]
    Conflict(String),

    /// Transition guard rejected the acting agent
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Document or slot not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage/transport error from the document store
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Serialization(err.to_string())
    }
}
