//! SQLite implementation of the Ledger trait.
//!
//! Persistent world state backed by rusqlite with bundled SQLite, wrapped in
//! async via tokio::spawn_blocking. Every call is its own SQLite statement, so
//! writes are visible to the next read immediately.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use copyright_ledger_core::CompositeKey;

use crate::error::{LedgerError, Result};
use crate::migration::{self, now_millis};
use crate::traits::Ledger;

/// SQLite-based ledger implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteLedger {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLedger {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| LedgerError::Backend(format!("connection mutex poisoned: {}", e)))?;
            f(&conn)
        })
        .await
        .map_err(|e| LedgerError::Backend(format!("spawn_blocking failed: {}", e)))?
    }
}

/// Smallest byte string greater than every string starting with `prefix`.
///
/// `None` means the range is unbounded above (empty prefix, or all 0xFF).
fn prefix_upper_bound(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut upper = prefix.to_vec();
    while let Some(last) = upper.pop() {
        if last < u8::MAX {
            upper.push(last + 1);
            return Some(upper);
        }
    }
    None
}

// Helper to convert a row to a (key, value) pair
fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<(CompositeKey, Bytes)> {
    let key_bytes: Vec<u8> = row.get("key")?;
    let value: Vec<u8> = row.get("value")?;

    let key = String::from_utf8(key_bytes).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
    })?;

    Ok((CompositeKey::from_raw(key), Bytes::from(value)))
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn get(&self, key: &CompositeKey) -> Result<Option<Bytes>> {
        let key = key.clone();

        self.with_conn(move |conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM world_state WHERE key = ?1",
                    params![key.as_bytes()],
                    |row| row.get(0),
                )
                .optional()?;

            Ok(value.map(Bytes::from))
        })
        .await
    }

    async fn put(&self, key: &CompositeKey, value: Bytes) -> Result<()> {
        let key = key.clone();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO world_state (key, value, version, updated_at)
                 VALUES (?1, ?2, 1, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    version = world_state.version + 1,
                    updated_at = excluded.updated_at",
                params![key.as_bytes(), &value[..], now_millis()],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &CompositeKey) -> Result<()> {
        let key = key.clone();

        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM world_state WHERE key = ?1",
                params![key.as_bytes()],
            )?;
            Ok(())
        })
        .await
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(CompositeKey, Bytes)>> {
        let lower = prefix.as_bytes().to_vec();

        self.with_conn(move |conn| {
            let entries = match prefix_upper_bound(&lower) {
                Some(upper) => {
                    let mut stmt = conn.prepare(
                        "SELECT key, value FROM world_state
                         WHERE key >= ?1 AND key < ?2
                         ORDER BY key",
                    )?;
                    let entries = stmt
                        .query_map(params![lower, upper], row_to_entry)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    entries
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT key, value FROM world_state
                         WHERE key >= ?1
                         ORDER BY key",
                    )?;
                    let entries = stmt
                        .query_map(params![lower], row_to_entry)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    entries
                }
            };

            Ok(entries)
        })
        .await
    }
}
