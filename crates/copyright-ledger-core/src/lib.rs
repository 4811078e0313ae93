//! # Copyright Ledger Core
//!
//! Pure primitives for the copyright ledger: the record schema, composite
//! key derivation, and payload validation.
//!
//! This crate contains no I/O, no storage, no identity resolution. It is pure
//! computation over record documents and key strings.
//!
//! ## Key Types
//!
//! - [`Copyright`] - The ownership-controlled record
//! - [`Author`] - Authorship details attached to a record
//! - [`Namespace`] - A validated type tag that scopes a key space
//! - [`CompositeKey`] - A namespaced storage key derived from a record id
//!
//! ## Encoding
//!
//! Records are stored as camelCase JSON. See [`record`] for the wire format and
//! the legacy `{id, name, owner}` shape accepted on read.

pub mod error;
pub mod key;
pub mod record;
pub mod validation;

pub use error::{CoreError, Result};
pub use key::{CompositeKey, Namespace, COPYRIGHT_NAMESPACE};
pub use record::{decode_record, encode_record, Author, Copyright, LegacyCopyright};
pub use validation::{validate_id, validate_record};
