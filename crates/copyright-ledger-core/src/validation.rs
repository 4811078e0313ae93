//! Input validation for records entering the ledger.

use crate::error::{CoreError, Result};
use crate::record::Copyright;

/// Validate a record id supplied by a caller.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CoreError::MalformedInput("copyright id is empty".into()));
    }
    Ok(())
}

/// Validate a record before it is written.
///
/// Only the id is checked. Titles, dates and author fields are free text and
/// are stored as given.
pub fn validate_record(record: &Copyright) -> Result<()> {
    validate_id(&record.id)
}
