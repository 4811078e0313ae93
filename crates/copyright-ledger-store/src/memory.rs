//! In-memory implementation of the Ledger trait.
//!
//! Every entry carries a version drawn from a ledger-wide counter, so a key
//! that is deleted and recreated never reuses a version. Direct calls on
//! [`MemoryLedger`] apply immediately; [`MemoryLedger::begin`] opens a
//! buffered [`MemoryTransaction`] that validates its read set on commit, the
//! way a hosting ledger runtime rejects stale endorsements.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;
use copyright_ledger_core::CompositeKey;

use crate::error::{LedgerError, Result};
use crate::traits::Ledger;

/// In-memory world state.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
pub struct MemoryLedger {
    inner: RwLock<MemoryLedgerInner>,
}

struct MemoryLedgerInner {
    /// Entries ordered by key bytes.
    entries: BTreeMap<CompositeKey, Entry>,

    /// Next version to hand out.
    next_version: u64,
}

#[derive(Clone)]
struct Entry {
    value: Bytes,
    version: u64,
}

impl MemoryLedgerInner {
    fn put(&mut self, key: CompositeKey, value: Bytes) {
        self.next_version += 1;
        let version = self.next_version;
        self.entries.insert(key, Entry { value, version });
    }

    fn version(&self, key: &CompositeKey) -> Option<u64> {
        self.entries.get(key).map(|e| e.version)
    }

    fn scan<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a CompositeKey, &'a Entry)> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.as_str().starts_with(prefix))
    }
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryLedgerInner {
                entries: BTreeMap::new(),
                next_version: 0,
            }),
        }
    }

    /// Open a transaction against this ledger.
    pub fn begin(&self) -> MemoryTransaction<'_> {
        MemoryTransaction {
            ledger: self,
            state: Mutex::new(TxState::default()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.entries.len())
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.entries.is_empty())
    }

    /// Current version of a key, if present.
    pub fn version(&self, key: &CompositeKey) -> Result<Option<u64>> {
        Ok(self.read()?.version(key))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryLedgerInner>> {
        self.inner
            .read()
            .map_err(|e| LedgerError::Backend(format!("ledger lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryLedgerInner>> {
        self.inner
            .write()
            .map_err(|e| LedgerError::Backend(format!("ledger lock poisoned: {}", e)))
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get(&self, key: &CompositeKey) -> Result<Option<Bytes>> {
        let inner = self.read()?;
        Ok(inner.entries.get(key).map(|e| e.value.clone()))
    }

    async fn put(&self, key: &CompositeKey, value: Bytes) -> Result<()> {
        self.write()?.put(key.clone(), value);
        Ok(())
    }

    async fn delete(&self, key: &CompositeKey) -> Result<()> {
        self.write()?.entries.remove(key);
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(CompositeKey, Bytes)>> {
        let inner = self.read()?;
        Ok(inner
            .scan(prefix)
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect())
    }
}

/// A buffered transaction over a [`MemoryLedger`].
///
/// Reads see the transaction's own writes first, then the ledger. The version
/// of every key read from the ledger is remembered (absent keys as `None`).
/// Nothing reaches the ledger until [`commit`](Self::commit); dropping the
/// transaction discards it.
pub struct MemoryTransaction<'a> {
    ledger: &'a MemoryLedger,
    state: Mutex<TxState>,
}

#[derive(Default)]
struct TxState {
    /// Version observed for each key read from the ledger.
    reads: HashMap<CompositeKey, Option<u64>>,

    /// Pending writes; `None` marks a delete.
    writes: BTreeMap<CompositeKey, Option<Bytes>>,
}

impl MemoryTransaction<'_> {
    /// Number of buffered writes and deletes.
    pub fn pending_writes(&self) -> Result<usize> {
        Ok(self.state()?.writes.len())
    }

    /// Validate the read set and apply all buffered writes atomically.
    ///
    /// Fails with [`LedgerError::Conflict`] and applies nothing if any key
    /// read by this transaction changed since it was read.
    pub fn commit(self) -> Result<()> {
        let state = self
            .state
            .into_inner()
            .map_err(|e| LedgerError::Backend(format!("transaction lock poisoned: {}", e)))?;
        let mut inner = self.ledger.write()?;

        for (key, seen) in &state.reads {
            if inner.version(key) != *seen {
                tracing::debug!(%key, "commit rejected: read set is stale");
                return Err(LedgerError::Conflict { key: key.clone() });
            }
        }

        for (key, write) in state.writes {
            match write {
                Some(value) => inner.put(key, value),
                None => {
                    inner.entries.remove(&key);
                }
            }
        }

        Ok(())
    }

    fn state(&self) -> Result<std::sync::MutexGuard<'_, TxState>> {
        self.state
            .lock()
            .map_err(|e| LedgerError::Backend(format!("transaction lock poisoned: {}", e)))
    }
}

#[async_trait]
impl Ledger for MemoryTransaction<'_> {
    async fn get(&self, key: &CompositeKey) -> Result<Option<Bytes>> {
        let mut state = self.state()?;
        if let Some(pending) = state.writes.get(key) {
            return Ok(pending.clone());
        }

        let inner = self.ledger.read()?;
        let entry = inner.entries.get(key);
        state
            .reads
            .entry(key.clone())
            .or_insert_with(|| entry.map(|e| e.version));
        Ok(entry.map(|e| e.value.clone()))
    }

    async fn put(&self, key: &CompositeKey, value: Bytes) -> Result<()> {
        self.state()?.writes.insert(key.clone(), Some(value));
        Ok(())
    }

    async fn delete(&self, key: &CompositeKey) -> Result<()> {
        self.state()?.writes.insert(key.clone(), None);
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(CompositeKey, Bytes)>> {
        let mut state = self.state()?;
        let inner = self.ledger.read()?;

        let mut merged = BTreeMap::new();
        for (key, entry) in inner.scan(prefix) {
            state
                .reads
                .entry(key.clone())
                .or_insert(Some(entry.version));
            merged.insert(key.clone(), entry.value.clone());
        }

        for (key, pending) in state
            .writes
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.as_str().starts_with(prefix))
        {
            match pending {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        Ok(merged.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copyright_ledger_core::Namespace;

    fn key(id: &str) -> CompositeKey {
        Namespace::copyright().derive_key(id)
    }

    #[tokio::test]
    async fn test_memory_ledger_basic() {
        let ledger = MemoryLedger::new();

        ledger.put(&key("a"), Bytes::from_static(b"1")).await.unwrap();
        assert_eq!(
            ledger.get(&key("a")).await.unwrap(),
            Some(Bytes::from_static(b"1"))
        );

        ledger.delete(&key("a")).await.unwrap();
        assert_eq!(ledger.get(&key("a")).await.unwrap(), None);
        assert!(ledger.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_scan_stays_in_namespace() {
        let ledger = MemoryLedger::new();
        let other = Namespace::new("COPYRIGHTX").unwrap();

        ledger.put(&key("b"), Bytes::from_static(b"b")).await.unwrap();
        ledger.put(&key("a"), Bytes::from_static(b"a")).await.unwrap();
        ledger
            .put(&other.derive_key("a"), Bytes::from_static(b"x"))
            .await
            .unwrap();

        let entries = ledger
            .scan_prefix(&Namespace::copyright().prefix())
            .await
            .unwrap();
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![key("a"), key("b")]);
    }

    #[tokio::test]
    async fn test_versions_never_reused() {
        let ledger = MemoryLedger::new();
        ledger.put(&key("a"), Bytes::from_static(b"1")).await.unwrap();
        let v1 = ledger.version(&key("a")).unwrap();

        ledger.delete(&key("a")).await.unwrap();
        ledger.put(&key("a"), Bytes::from_static(b"1")).await.unwrap();
        let v2 = ledger.version(&key("a")).unwrap();

        assert_ne!(v1, v2);
    }

    #[tokio::test]
    async fn test_transaction_reads_own_writes() {
        let ledger = MemoryLedger::new();
        ledger.put(&key("a"), Bytes::from_static(b"old")).await.unwrap();

        let tx = ledger.begin();
        tx.put(&key("a"), Bytes::from_static(b"new")).await.unwrap();
        tx.put(&key("b"), Bytes::from_static(b"b")).await.unwrap();
        assert_eq!(
            tx.get(&key("a")).await.unwrap(),
            Some(Bytes::from_static(b"new"))
        );
        assert_eq!(tx.pending_writes().unwrap(), 2);

        // Nothing visible outside until commit.
        assert_eq!(
            ledger.get(&key("a")).await.unwrap(),
            Some(Bytes::from_static(b"old"))
        );
        assert_eq!(ledger.get(&key("b")).await.unwrap(), None);

        tx.commit().unwrap();
        assert_eq!(ledger.len().unwrap(), 2);
        assert_eq!(
            ledger.get(&key("a")).await.unwrap(),
            Some(Bytes::from_static(b"new"))
        );
    }

    #[tokio::test]
    async fn test_transaction_scan_merges_pending() {
        let ledger = MemoryLedger::new();
        ledger.put(&key("a"), Bytes::from_static(b"a")).await.unwrap();
        ledger.put(&key("b"), Bytes::from_static(b"b")).await.unwrap();

        let tx = ledger.begin();
        tx.delete(&key("a")).await.unwrap();
        tx.put(&key("c"), Bytes::from_static(b"c")).await.unwrap();

        let keys: Vec<_> = tx
            .scan_prefix(&Namespace::copyright().prefix())
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![key("b"), key("c")]);
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let ledger = MemoryLedger::new();
        {
            let tx = ledger.begin();
            tx.put(&key("a"), Bytes::from_static(b"a")).await.unwrap();
        }
        assert!(ledger.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_create_conflicts() {
        let ledger = MemoryLedger::new();

        let t1 = ledger.begin();
        let t2 = ledger.begin();
        assert_eq!(t1.get(&key("a")).await.unwrap(), None);
        assert_eq!(t2.get(&key("a")).await.unwrap(), None);
        t1.put(&key("a"), Bytes::from_static(b"one")).await.unwrap();
        t2.put(&key("a"), Bytes::from_static(b"two")).await.unwrap();

        t1.commit().unwrap();
        let err = t2.commit().unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, LedgerError::Conflict { key: k } if k == key("a")));

        assert_eq!(
            ledger.get(&key("a")).await.unwrap(),
            Some(Bytes::from_static(b"one"))
        );
    }

    #[tokio::test]
    async fn test_blind_writes_do_not_conflict() {
        let ledger = MemoryLedger::new();

        let t1 = ledger.begin();
        let t2 = ledger.begin();
        t1.put(&key("a"), Bytes::from_static(b"one")).await.unwrap();
        t2.put(&key("b"), Bytes::from_static(b"two")).await.unwrap();

        t1.commit().unwrap();
        t2.commit().unwrap();
        assert_eq!(ledger.len().unwrap(), 2);
    }
}
