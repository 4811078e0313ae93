//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use copyright_ledger::store::{Ledger, MemoryLedger};
use copyright_ledger::{
    ContractConfig, Context, Copyright, CopyrightContract, IdentityProvider, Result, Transaction,
    X509Identity,
};

/// A memory ledger with a contract bound to it.
pub struct TestFixture {
    pub ledger: MemoryLedger,
    pub contract: CopyrightContract,
}

impl TestFixture {
    /// Create a fixture with the default contract configuration.
    pub fn new() -> Self {
        Self::with_config(ContractConfig::default())
    }

    /// Create a fixture with a custom contract configuration.
    pub fn with_config(config: ContractConfig) -> Self {
        Self {
            ledger: MemoryLedger::new(),
            contract: CopyrightContract::new(config),
        }
    }

    /// Run one transaction function as `caller`.
    ///
    /// The call runs inside its own ledger transaction. Submitting functions
    /// commit on success; evaluate-only functions never do.
    pub async fn submit(
        &self,
        caller: &dyn IdentityProvider,
        function: &str,
        args: &[&str],
    ) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let tx = self.ledger.begin();

        let output = {
            let ctx = Context::new(&tx, caller);
            self.contract.invoke(&ctx, function, &args).await?
        };

        let function: Transaction = function.parse()?;
        if !function.is_read_only() {
            tx.commit()?;
        }
        Ok(output)
    }

    /// Create a record as `caller`, outside any transaction.
    pub async fn create(&self, caller: &dyn IdentityProvider, record: Copyright) -> Result<()> {
        let ctx = Context::new(&self.ledger, caller);
        self.contract.create(&ctx, record).await
    }

    /// Read a record straight from the ledger.
    pub async fn read(&self, id: &str) -> Result<Copyright> {
        let nobody = NoCaller;
        let ctx = Context::new(&self.ledger, &nobody);
        self.contract.read(&ctx, id).await
    }

    /// Raw stored bytes for a record id.
    pub async fn raw(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let value = self.ledger.get(&self.contract.key(id)).await?;
        Ok(value.map(|bytes| bytes.to_vec()))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// Reads need no identity.
struct NoCaller;

impl IdentityProvider for NoCaller {
    fn caller_id(&self) -> &str {
        ""
    }
}

/// Create distinct certificate identities for multi-party tests.
pub fn multi_party_identities(count: usize) -> Vec<X509Identity> {
    (0..count)
        .map(|i| {
            X509Identity::new(
                format!("Org{}MSP", i + 1),
                format!("/C=US/O=Org{}/CN=user{}", i + 1, i),
                format!("/C=US/O=Org{}/CN=ca.org{}", i + 1, i + 1),
            )
        })
        .collect()
}
