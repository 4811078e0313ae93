//! # Copyright Ledger
//!
//! Ownership-controlled copyright records on a transactional key-value ledger.
//!
//! ## Overview
//!
//! The [`CopyrightContract`] enforces the record lifecycle:
//!
//! - **Create**: fails if the id is taken; the caller becomes the creator
//! - **Read**: public, no ownership check
//! - **Update / Delete**: creator only; existence is checked before ownership
//!
//! Each operation receives a [`Context`] carrying the ledger view of the
//! current transaction and the caller's identity. The contract keeps no
//! ambient state between calls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use copyright_ledger::{Context, CopyrightContract, StaticIdentity};
//! use copyright_ledger::core::Copyright;
//! use copyright_ledger::store::MemoryLedger;
//!
//! async fn example() {
//!     let ledger = MemoryLedger::new();
//!     let alice = StaticIdentity::new("alice");
//!     let contract = CopyrightContract::default();
//!
//!     let tx = ledger.begin();
//!     let ctx = Context::new(&tx, &alice);
//!     contract
//!         .create(&ctx, Copyright::new("cp1", "Work1"))
//!         .await
//!         .unwrap();
//!     tx.commit().unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `copyright_ledger::core` - Record schema and composite keys
//! - `copyright_ledger::store` - Ledger trait and backends

pub mod context;
pub mod contract;
pub mod dispatch;
pub mod error;
pub mod identity;

pub use copyright_ledger_core as core;
pub use copyright_ledger_store as store;

pub use context::Context;
pub use contract::{ContractConfig, CopyrightContract, RecordScan};
pub use dispatch::Transaction;
pub use error::{ContractError, Result};
pub use identity::{IdentityProvider, StaticIdentity, X509Identity};

pub use copyright_ledger_core::{Author, Copyright, Namespace};
