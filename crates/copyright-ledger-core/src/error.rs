//! Error types for the copyright ledger core.

use thiserror::Error;

/// Errors raised while validating, encoding or decoding records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid namespace tag {tag:?}: {reason}")]
    InvalidNamespace { tag: String, reason: &'static str },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
