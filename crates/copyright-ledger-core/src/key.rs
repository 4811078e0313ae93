//! Composite keys: namespaced storage keys derived from record ids.
//!
//! A key is laid out as `\0 <tag> \0 <id> \0`. The tag is validated to be
//! non-empty and free of `\0`, so it always ends at the second delimiter and
//! keys from different namespaces can never coincide. For a fixed namespace the
//! id sits between a fixed prefix and a fixed suffix, which makes derivation
//! injective without restricting the id alphabet.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{CoreError, Result};

/// Delimiter between composite key segments.
const DELIMITER: char = '\u{0000}';

/// Type tag used for copyright records.
pub const COPYRIGHT_NAMESPACE: &str = "COPYRIGHT";

/// A validated type tag scoping one kind of record in the shared key space.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from a type tag.
    ///
    /// The tag must be non-empty and must not contain the key delimiter.
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(CoreError::InvalidNamespace {
                tag,
                reason: "tag is empty",
            });
        }
        if tag.contains(DELIMITER) {
            return Err(CoreError::InvalidNamespace {
                tag,
                reason: "tag contains U+0000",
            });
        }
        Ok(Self(tag))
    }

    /// The namespace holding copyright records.
    pub fn copyright() -> Self {
        Self(COPYRIGHT_NAMESPACE.to_string())
    }

    /// The raw type tag.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Derive the storage key for a record id.
    ///
    /// Deterministic and injective for a fixed namespace. Never fails.
    pub fn derive_key(&self, id: &str) -> CompositeKey {
        let mut key = String::with_capacity(self.0.len() + id.len() + 3);
        key.push(DELIMITER);
        key.push_str(&self.0);
        key.push(DELIMITER);
        key.push_str(id);
        key.push(DELIMITER);
        CompositeKey(key)
    }

    /// The prefix shared by every key in this namespace.
    pub fn prefix(&self) -> String {
        let mut prefix = String::with_capacity(self.0.len() + 2);
        prefix.push(DELIMITER);
        prefix.push_str(&self.0);
        prefix.push(DELIMITER);
        prefix
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::copyright()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", self.0)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Namespace {
    type Error = CoreError;

    fn try_from(tag: String) -> Result<Self> {
        Self::new(tag)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}

/// A namespaced storage key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Wrap a raw key read back from storage.
    ///
    /// No validation is performed; use [`CompositeKey::split`] to check shape.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The key as a string, delimiters included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Split the key back into `(tag, id)`.
    ///
    /// Returns `None` if the key is not in composite form.
    pub fn split(&self) -> Option<(&str, &str)> {
        let rest = self.0.strip_prefix(DELIMITER)?;
        let rest = rest.strip_suffix(DELIMITER)?;
        let (tag, id) = rest.split_once(DELIMITER)?;
        if tag.is_empty() {
            return None;
        }
        Some((tag, id))
    }

    /// Whether the key lies in the given namespace.
    pub fn in_namespace(&self, namespace: &Namespace) -> bool {
        self.0.starts_with(&namespace.prefix())
    }
}

impl fmt::Debug for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeKey({})", self)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.split() {
            Some((tag, id)) => write!(f, "{}/{}", tag, id),
            None => write!(f, "{}", self.0.escape_default()),
        }
    }
}

impl Borrow<str> for CompositeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for CompositeKey {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
