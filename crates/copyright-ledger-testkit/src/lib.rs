//! # Copyright Ledger Testkit
//!
//! Testing utilities for the copyright ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Document vectors**: Stored documents with their expected decoding, covering
//!   the current schema and the legacy `{id, name, owner}` shape
//! - **Generators**: Proptest strategies for records, authors, and ids
//! - **Fixtures**: A ledger plus contract that submits transactions the way a
//!   hosting runtime would
//!
//! ## Document Vectors
//!
//! ```rust
//! use copyright_ledger_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, detail) in verify_all_vectors() {
//!     assert!(ok, "{}: {}", name, detail);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use copyright_ledger_testkit::generators::copyright;
//!
//! proptest! {
//!     #[test]
//!     fn ids_are_never_empty(record in copyright()) {
//!         prop_assert!(!record.id.is_empty());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use copyright_ledger_testkit::fixtures::{multi_party_identities, TestFixture};
//!
//! async fn example() {
//!     let fixture = TestFixture::new();
//!     let parties = multi_party_identities(2);
//!
//!     fixture
//!         .submit(&parties[0], "createCopyright", &[r#"{"id":"cp1","title":"Work1"}"#])
//!         .await
//!         .unwrap();
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_identities, TestFixture};
pub use generators::{author, copyright, record_batch, record_id};
pub use vectors::{all_vectors, verify_all_vectors, DocumentVector};
