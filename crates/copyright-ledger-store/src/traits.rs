//! Ledger trait: the abstract interface to world state.
//!
//! This trait keeps the contract storage-agnostic. Implementations include
//! an in-memory ledger (with transactions) and SQLite.

use std::future::Future;

use async_trait::async_trait;
use bytes::Bytes;
use copyright_ledger_core::CompositeKey;

use crate::error::Result;

/// The Ledger trait: async key-value access within the current transaction.
///
/// Atomicity, commit and rollback belong to whoever supplies the
/// implementation. Callers may assume each call is immediately consistent
/// with the calls made before it on the same value.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Get the value stored at a key.
    async fn get(&self, key: &CompositeKey) -> Result<Option<Bytes>>;

    /// Store a value at a key, replacing any previous value.
    async fn put(&self, key: &CompositeKey, value: Bytes) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error at this layer.
    async fn delete(&self, key: &CompositeKey) -> Result<()>;

    /// Get every entry whose key starts with `prefix`.
    ///
    /// Returns `(key, value)` pairs ordered by key bytes. The result is a
    /// snapshot taken when the call runs.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(CompositeKey, Bytes)>>;
}

/// Extension trait for common ledger patterns.
pub trait LedgerExt: Ledger {
    /// Whether a non-empty value is stored at `key`.
    fn has_value(&self, key: &CompositeKey) -> impl Future<Output = Result<bool>> + Send;
}

impl<L: Ledger + ?Sized> LedgerExt for L {
    async fn has_value(&self, key: &CompositeKey) -> Result<bool> {
        let value = self.get(key).await?;
        Ok(value.is_some_and(|v| !v.is_empty()))
    }
}
