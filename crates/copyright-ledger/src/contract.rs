//! The copyright contract: lifecycle rules for ownership-controlled records.
//!
//! Every mutating operation checks existence first, then ownership, then
//! issues exactly one ledger write. A caller probing an id that does not exist
//! therefore always sees `NotFound`, never `NotAuthorized`.

use bytes::Bytes;
use copyright_ledger_core::{
    decode_record, encode_record, validate_id, validate_record, CompositeKey, Copyright,
    Namespace,
};
use copyright_ledger_store::LedgerExt;

use crate::context::Context;
use crate::error::{ContractError, Result};

/// Configuration for the contract.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    /// Namespace all record keys are derived under.
    pub namespace: Namespace,
    /// Whether stored `{id, name, owner}` documents are readable.
    pub accept_legacy: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            namespace: Namespace::copyright(),
            accept_legacy: true,
        }
    }
}

/// The record controller.
///
/// Holds no ledger or identity of its own; both arrive with each call in a
/// [`Context`], so one contract value serves any number of transactions.
#[derive(Debug, Clone, Default)]
pub struct CopyrightContract {
    config: ContractConfig,
}

impl CopyrightContract {
    /// Create a contract with the given configuration.
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Storage key for a record id.
    pub fn key(&self, id: &str) -> CompositeKey {
        self.config.namespace.derive_key(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether a record with this id is stored.
    pub async fn exists(&self, ctx: &Context<'_>, id: &str) -> Result<bool> {
        Ok(ctx.ledger.has_value(&self.key(id)).await?)
    }

    /// Read a record. Any caller may read any record.
    pub async fn read(&self, ctx: &Context<'_>, id: &str) -> Result<Copyright> {
        self.load(ctx, id).await
    }

    /// Scan every record in the namespace.
    ///
    /// Each call runs a fresh scan. Records decode lazily as the returned
    /// iterator is advanced, in ledger key order.
    pub async fn read_all(&self, ctx: &Context<'_>) -> Result<RecordScan> {
        let entries = ctx
            .ledger
            .scan_prefix(&self.config.namespace.prefix())
            .await?;

        Ok(RecordScan {
            entries: entries.into_iter(),
            accept_legacy: self.config.accept_legacy,
        })
    }

    /// Scan every record and collect them, failing on the first bad value.
    pub async fn read_all_vec(&self, ctx: &Context<'_>) -> Result<Vec<Copyright>> {
        self.read_all(ctx).await?.collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a record owned by the caller.
    ///
    /// Any `creator` in the input is replaced by the caller's identity.
    pub async fn create(&self, ctx: &Context<'_>, record: Copyright) -> Result<()> {
        validate_record(&record)?;

        if self.exists(ctx, &record.id).await? {
            return Err(ContractError::AlreadyExists(record.id));
        }

        let caller = ctx.caller_id();
        let record = record.stamped(caller);
        self.store(ctx, &record).await?;

        tracing::debug!(id = %record.id, creator = caller, "copyright created");
        Ok(())
    }

    /// Replace every field of a record except its id.
    ///
    /// Only the creator may update. The creator is re-stamped from the caller,
    /// so ownership cannot be transferred through this path.
    pub async fn update(&self, ctx: &Context<'_>, record: Copyright) -> Result<()> {
        validate_record(&record)?;

        let stored = self.load(ctx, &record.id).await?;
        let caller = self.authorize(ctx, &stored)?;

        let record = record.stamped(caller);
        self.store(ctx, &record).await?;

        tracing::debug!(id = %record.id, "copyright updated");
        Ok(())
    }

    /// Remove a record. Only the creator may delete.
    pub async fn delete(&self, ctx: &Context<'_>, id: &str) -> Result<()> {
        validate_id(id)?;

        let stored = self.load(ctx, id).await?;
        self.authorize(ctx, &stored)?;

        ctx.ledger.delete(&self.key(id)).await?;

        tracing::debug!(id, "copyright deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    async fn load(&self, ctx: &Context<'_>, id: &str) -> Result<Copyright> {
        let value = ctx.ledger.get(&self.key(id)).await?;
        match value {
            Some(bytes) if !bytes.is_empty() => {
                Ok(decode_record(&bytes, self.config.accept_legacy)?)
            }
            _ => Err(ContractError::NotFound(id.to_string())),
        }
    }

    async fn store(&self, ctx: &Context<'_>, record: &Copyright) -> Result<()> {
        let bytes: Bytes = encode_record(record)?;
        ctx.ledger.put(&self.key(&record.id), bytes).await?;
        Ok(())
    }

    fn authorize<'a>(&self, ctx: &Context<'a>, stored: &Copyright) -> Result<&'a str> {
        let caller = ctx.caller_id();
        if !stored.is_owned_by(caller) {
            tracing::warn!(id = %stored.id, caller, "rejected modification by non-creator");
            return Err(ContractError::NotAuthorized {
                id: stored.id.clone(),
            });
        }
        Ok(caller)
    }
}

/// Lazily decoded records from one namespace scan.
pub struct RecordScan {
    entries: std::vec::IntoIter<(CompositeKey, Bytes)>,
    accept_legacy: bool,
}

impl RecordScan {
    /// Number of entries not yet visited.
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl Iterator for RecordScan {
    type Item = Result<Copyright>;

    fn next(&mut self) -> Option<Self::Item> {
        for (key, value) in self.entries.by_ref() {
            if value.is_empty() {
                continue;
            }
            return Some(decode_record(&value, self.accept_legacy).map_err(|e| {
                ContractError::MalformedInput(format!("stored value at {}: {}", key, e))
            }));
        }
        None
    }
}
