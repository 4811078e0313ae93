//! Error types for the copyright contract.

use copyright_ledger_core::CoreError;
use copyright_ledger_store::LedgerError;
use thiserror::Error;

/// Errors that can occur during contract operations.
#[derive(Debug, Error)]
pub enum ContractError {
    /// A record with this id is already on the ledger.
    #[error("the copyright {0} already exists")]
    AlreadyExists(String),

    /// No record with this id is on the ledger.
    #[error("the copyright {0} does not exist")]
    NotFound(String),

    /// The caller is not the creator of the record.
    #[error("caller is not authorised to modify copyright {id}")]
    NotAuthorized { id: String },

    /// The payload could not be parsed or lacks a required field.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Ledger access failed. Surfaced as reported by the ledger.
    #[error("ledger access failure: {0}")]
    Ledger(#[from] LedgerError),

    /// No transaction with this name is exposed.
    #[error("unknown transaction function: {0}")]
    UnknownFunction(String),
}

impl ContractError {
    /// Whether the hosting runtime may resubmit the transaction.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ContractError::Ledger(e) if e.is_retryable())
    }
}

impl From<CoreError> for ContractError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::MalformedInput(msg) => ContractError::MalformedInput(msg),
            CoreError::InvalidNamespace { .. } | CoreError::Serialization(_) => {
                ContractError::MalformedInput(e.to_string())
            }
        }
    }
}

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
