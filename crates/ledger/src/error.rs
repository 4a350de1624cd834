//! Ledger error types.

use evm_bank_primitives::Address;
use num_bigint::BigUint;
use thiserror::Error;

/// Errors surfaced by the bank ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient funds: {address} holds {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        address: Address,
        denom: String,
        available: BigUint,
        required: BigUint,
    },

    #[error("{0} transfers are currently disabled")]
    SendDisabled(String),

    #[error("{0} is not allowed to receive funds")]
    Unauthorized(Address),

    #[error("module account {0} does not exist")]
    UnknownModule(String),

    #[error("module account {module} does not have permissions to {permission} tokens")]
    MissingPermission {
        module: String,
        permission: &'static str,
    },

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<LedgerError>,
    },
}

impl LedgerError {
    /// Wraps the error with a description of the step that failed.
    pub fn wrap(self, message: impl Into<String>) -> Self {
        Self::Context {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, unwrapping any context layers.
    pub fn root_cause(&self) -> &LedgerError {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Attaches context to ledger results.
pub trait LedgerResultExt<T> {
    fn context(self, message: &str) -> LedgerResult<T>;
}

impl<T> LedgerResultExt<T> for LedgerResult<T> {
    fn context(self, message: &str) -> LedgerResult<T> {
        self.map_err(|e| e.wrap(message))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
