//! The transaction context threaded through every contract operation.

use copyright_ledger_store::Ledger;

use crate::identity::IdentityProvider;

/// Capabilities available to one contract invocation.
///
/// The hosting runtime builds a context per transaction: the ledger view the
/// transaction reads and writes, and the identity that submitted it.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub ledger: &'a dyn Ledger,
    pub identity: &'a dyn IdentityProvider,
}

impl<'a> Context<'a> {
    pub fn new(ledger: &'a dyn Ledger, identity: &'a dyn IdentityProvider) -> Self {
        Self { ledger, identity }
    }

    /// The authenticated caller.
    pub fn caller_id(&self) -> &'a str {
        self.identity.caller_id()
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("caller", &self.caller_id())
            .finish_non_exhaustive()
    }
}
