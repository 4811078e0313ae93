//! Stored-document vectors.
//!
//! Each vector is a document as it may sit on the ledger, with the record it
//! must decode to. Ledgers written by earlier contract versions hold the
//! legacy shape, so those documents stay readable forever.

use copyright_ledger::core::{decode_record, encode_record};
use copyright_ledger::{Author, Copyright};

/// A stored document and its expected decoding.
#[derive(Debug, Clone)]
pub struct DocumentVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The stored JSON text.
    pub document: &'static str,
    /// Whether legacy documents are accepted while decoding.
    pub accept_legacy: bool,
    /// The expected record, or `None` if decoding must fail.
    pub expected: Option<Copyright>,
}

/// Get all document vectors.
pub fn all_vectors() -> Vec<DocumentVector> {
    vec![
        DocumentVector {
            name: "minimal current record",
            document: r#"{"id":"cp1","title":"Work1","altTitles":[],"contributions":[],"authors":[],"creator":"alice"}"#,
            accept_legacy: false,
            expected: Some(Copyright::new("cp1", "Work1").stamped("alice")),
        },
        DocumentVector {
            name: "current record with omitted sequences",
            document: r#"{"id":"cp2","title":"Work2"}"#,
            accept_legacy: false,
            expected: Some(Copyright::new("cp2", "Work2")),
        },
        DocumentVector {
            name: "full current record",
            document: r#"{"id":"cp3","title":"Work3","altTitles":["Opus 3"],"contributions":["Anthology"],"authors":[{"name":"Ada","authorship":"named","dateOfBirth":"1815-12-10"}],"creationDate":"1843","publicationDate":"1844","creator":"x509::CN=ada::CN=ca"}"#,
            accept_legacy: false,
            expected: Some(Copyright {
                id: "cp3".into(),
                title: "Work3".into(),
                alt_titles: vec!["Opus 3".into()],
                contributions: vec!["Anthology".into()],
                authors: vec![Author {
                    name: Some("Ada".into()),
                    authorship: Some("named".into()),
                    date_of_birth: Some("1815-12-10".into()),
                    ..Author::default()
                }],
                creation_date: Some("1843".into()),
                publication_date: Some("1844".into()),
                creator: Some("x509::CN=ada::CN=ca".into()),
            }),
        },
        DocumentVector {
            name: "legacy record",
            document: r#"{"id":"old1","name":"Old Work","owner":"alice"}"#,
            accept_legacy: true,
            expected: Some(Copyright::new("old1", "Old Work").stamped("alice")),
        },
        DocumentVector {
            name: "legacy record without owner",
            document: r#"{"id":"old2","name":"Orphan"}"#,
            accept_legacy: true,
            expected: Some(Copyright::new("old2", "Orphan")),
        },
        DocumentVector {
            name: "legacy record refused",
            document: r#"{"id":"old1","name":"Old Work","owner":"alice"}"#,
            accept_legacy: false,
            expected: None,
        },
        DocumentVector {
            name: "not json",
            document: "garbage",
            accept_legacy: true,
            expected: None,
        },
    ]
}

/// Decode every vector and compare against its expectation.
///
/// Returns `(name, matches, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let decoded = decode_record(v.document.as_bytes(), v.accept_legacy);
            let (matches, detail) = match (&decoded, &v.expected) {
                (Ok(record), Some(expected)) => (record == expected, format!("{:?}", record)),
                (Err(e), None) => (true, e.to_string()),
                (Ok(record), None) => (false, format!("unexpectedly decoded {:?}", record)),
                (Err(e), Some(_)) => (false, e.to_string()),
            };
            (v.name.to_string(), matches, detail)
        })
        .collect()
}

/// Whether a current-schema vector re-encodes to the same JSON value.
pub fn reencodes_identically(vector: &DocumentVector) -> bool {
    let Some(expected) = &vector.expected else {
        return false;
    };
    let Ok(bytes) = encode_record(expected) else {
        return false;
    };
    let original: Result<serde_json::Value, _> = serde_json::from_str(vector.document);
    let encoded: Result<serde_json::Value, _> = serde_json::from_slice(&bytes);
    matches!((original, encoded), (Ok(a), Ok(b)) if a == b)
}
