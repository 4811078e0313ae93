//! The copyright record and its wire format.
//!
//! Records are encoded as JSON objects with camelCase field names. Optional
//! scalar fields are omitted when absent; sequence fields default to empty.
//! There is no schema version tag.
//!
//! Older ledgers stored a minimal `{id, name, owner}` document. [`decode_record`]
//! accepts that shape and lifts it into a [`Copyright`] when asked to.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A contributor to a copyrighted work.
///
/// Every field is free text. Nothing ties an author to other records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// What the author did for the work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution: Option<String>,
    /// Authorship designation, e.g. anonymous or pseudonymous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

impl Author {
    /// Create an author with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// An ownership-controlled copyright record.
///
/// `creator` is never trusted from input: the contract overwrites it with the
/// resolved caller identity on every write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Copyright {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub alt_titles: Vec<String>,
    /// Titles of other works this one contributed to.
    #[serde(default)]
    pub contributions: Vec<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

impl Copyright {
    /// Create a record with an id and title and nothing else.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replace `creator` with the given identity.
    pub fn stamped(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Whether `caller` is the recorded creator.
    ///
    /// A record with no creator is owned by nobody.
    pub fn is_owned_by(&self, caller: &str) -> bool {
        self.creator.as_deref() == Some(caller)
    }

    /// Parse a record from a UTF-8 JSON payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| CoreError::MalformedInput(format!("invalid copyright payload: {}", e)))
    }

    /// Render the record as JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The minimal record shape written by earlier versions of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCopyright {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
}

impl From<LegacyCopyright> for Copyright {
    fn from(legacy: LegacyCopyright) -> Self {
        Self {
            id: legacy.id,
            title: legacy.name,
            creator: legacy.owner,
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Current(Copyright),
    Legacy(LegacyCopyright),
}

/// Encode a record into the bytes stored on the ledger.
pub fn encode_record(record: &Copyright) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(record)?))
}

/// Decode a stored value into a record.
///
/// With `accept_legacy`, a document in the legacy `{id, name, owner}` shape is
/// lifted into the current schema. Otherwise only current documents decode.
pub fn decode_record(bytes: &[u8], accept_legacy: bool) -> Result<Copyright> {
    if !accept_legacy {
        return serde_json::from_slice(bytes)
            .map_err(|e| CoreError::MalformedInput(format!("undecodable record: {}", e)));
    }

    match serde_json::from_slice(bytes) {
        Ok(StoredDocument::Current(record)) => Ok(record),
        Ok(StoredDocument::Legacy(legacy)) => Ok(legacy.into()),
        Err(e) => Err(CoreError::MalformedInput(format!(
            "undecodable record: {}",
            e
        ))),
    }
}
