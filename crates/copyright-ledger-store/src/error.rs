//! Error types for the store module.

use copyright_ledger_core::CompositeKey;
use thiserror::Error;

/// Errors that can occur while accessing the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A key read by the transaction changed before it committed.
    #[error("commit conflict on key {key}")]
    Conflict { key: CompositeKey },

    /// The backend failed outside the database itself.
    #[error("backend failure: {0}")]
    Backend(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// Whether resubmitting the whole transaction may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Conflict { .. })
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
