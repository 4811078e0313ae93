//! Named transaction functions with text arguments and results.
//!
//! Hosting runtimes invoke the contract by function name with an argument
//! list of UTF-8 strings. Results come back as JSON text; functions with no
//! result return an empty string.

use std::fmt;
use std::str::FromStr;

use copyright_ledger_core::{CoreError, Copyright};

use crate::context::Context;
use crate::contract::CopyrightContract;
use crate::error::{ContractError, Result};

/// A transaction function exposed by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transaction {
    Exists,
    Create,
    Read,
    ReadAll,
    Update,
    Delete,
}

impl Transaction {
    /// Every exposed function.
    pub const ALL: [Transaction; 6] = [
        Transaction::Exists,
        Transaction::Create,
        Transaction::Read,
        Transaction::ReadAll,
        Transaction::Update,
        Transaction::Delete,
    ];

    /// The function name callers invoke.
    pub const fn name(self) -> &'static str {
        match self {
            Transaction::Exists => "copyrightExists",
            Transaction::Create => "createCopyright",
            Transaction::Read => "readCopyright",
            Transaction::ReadAll => "readAllCopyright",
            Transaction::Update => "updateCopyright",
            Transaction::Delete => "deleteCopyright",
        }
    }

    /// Number of string arguments the function takes.
    pub const fn arity(self) -> usize {
        match self {
            Transaction::ReadAll => 0,
            _ => 1,
        }
    }

    /// Evaluate-only functions never write, so their results need no commit.
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            Transaction::Exists | Transaction::Read | Transaction::ReadAll
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transaction {
    type Err = ContractError;

    fn from_str(name: &str) -> Result<Self> {
        Transaction::ALL
            .into_iter()
            .find(|tx| tx.name() == name)
            .ok_or_else(|| ContractError::UnknownFunction(name.to_string()))
    }
}

impl CopyrightContract {
    /// Invoke a transaction function by name.
    pub async fn invoke(&self, ctx: &Context<'_>, function: &str, args: &[String]) -> Result<String> {
        let tx: Transaction = function.parse()?;
        if args.len() != tx.arity() {
            return Err(ContractError::MalformedInput(format!(
                "{} expects {} argument(s), got {}",
                tx,
                tx.arity(),
                args.len()
            )));
        }

        tracing::trace!(function = tx.name(), caller = ctx.caller_id(), "invoke");

        match tx {
            Transaction::Exists => Ok(self.exists(ctx, &args[0]).await?.to_string()),
            Transaction::Create => {
                self.create(ctx, Copyright::from_json(&args[0])?).await?;
                Ok(String::new())
            }
            Transaction::Read => Ok(self.read(ctx, &args[0]).await?.to_json()?),
            Transaction::ReadAll => {
                let records = self.read_all_vec(ctx).await?;
                Ok(serde_json::to_string(&records).map_err(CoreError::from)?)
            }
            Transaction::Update => {
                self.update(ctx, Copyright::from_json(&args[0])?).await?;
                Ok(String::new())
            }
            Transaction::Delete => {
                self.delete(ctx, &args[0]).await?;
                Ok(String::new())
            }
        }
    }
}
