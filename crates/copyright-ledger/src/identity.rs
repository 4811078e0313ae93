//! Caller identity: who is invoking the current operation.
//!
//! The hosting runtime authenticates the caller before any contract code runs.
//! The contract only compares the resulting string against stored creators.

/// Supplies the authenticated identity of the current caller.
pub trait IdentityProvider: Send + Sync {
    /// A stable identifier for the invoking principal.
    fn caller_id(&self) -> &str;
}

/// An identity given as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticIdentity(String);

impl StaticIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdentityProvider for StaticIdentity {
    fn caller_id(&self) -> &str {
        &self.0
    }
}

/// An identity backed by an X.509 client certificate.
///
/// The caller id is `x509::<subject>::<issuer>`, matching the format
/// permissioned ledger runtimes report for certificate-based clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X509Identity {
    msp_id: String,
    subject: String,
    issuer: String,
    id: String,
}

impl X509Identity {
    pub fn new(
        msp_id: impl Into<String>,
        subject: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        let subject = subject.into();
        let issuer = issuer.into();
        let id = format!("x509::{}::{}", subject, issuer);
        Self {
            msp_id: msp_id.into(),
            subject,
            issuer,
            id,
        }
    }

    /// Membership service provider that issued the certificate.
    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// Certificate subject distinguished name.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Certificate issuer distinguished name.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}

impl IdentityProvider for X509Identity {
    fn caller_id(&self) -> &str {
        &self.id
    }
}
