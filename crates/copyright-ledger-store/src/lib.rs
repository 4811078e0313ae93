//! # Copyright Ledger Store
//!
//! World-state access for the copyright ledger. Provides a trait-based
//! interface over a key-value ledger with in-memory and SQLite implementations.
//!
//! ## Overview
//!
//! The contract never touches storage directly. Every read and write goes
//! through the [`Ledger`] trait using keys derived by the core key encoder.
//! [`MemoryLedger`] doubles as a transactional runtime for tests, and
//! [`SqliteLedger`] persists world state on disk.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The async trait for get/put/delete/prefix-scan
//! - [`LedgerExt`] - Derived helpers such as the existence check
//! - [`MemoryLedger`] - Versioned in-memory world state
//! - [`MemoryTransaction`] - Buffered transaction with commit-time conflict detection
//! - [`SqliteLedger`] - SQLite-backed persistent world state
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use copyright_ledger_core::Namespace;
//! use copyright_ledger_store::{Ledger, MemoryLedger};
//!
//! async fn example() {
//!     let ledger = MemoryLedger::new();
//!     let key = Namespace::copyright().derive_key("c1");
//!
//!     let tx = ledger.begin();
//!     tx.put(&key, Bytes::from_static(b"{}")).await.unwrap();
//!     tx.commit().unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Immediate consistency**: within one transaction a write is visible to the next read
//! - **Commit-time conflicts**: a stale read set fails the commit with a retryable error
//! - **Ordered scans**: prefix scans return keys in byte order

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{LedgerError, Result};
pub use memory::{MemoryLedger, MemoryTransaction};
pub use sqlite::SqliteLedger;
pub use traits::{Ledger, LedgerExt};
