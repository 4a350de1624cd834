//! Error types for the bank precompile.

use evm_bank_ledger::LedgerError;
use evm_bank_primitives::Address;
use thiserror::Error;

/// Errors raised by the argument codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("insufficient data: need {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error("argument {index}: address word has non-zero padding")]
    InvalidAddressPadding { index: usize },

    #[error("value {index} does not fit in uint256")]
    UintOverflow { index: usize },

    #[error("value {index}: expected {expected}")]
    TypeMismatch { index: usize, expected: &'static str },

    #[error("expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
}

pub type AbiResult<T> = Result<T, AbiError>;

/// Failure categories of a precompile call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownMethod,
    ReadOnlyViolation,
    MalformedArguments,
    InvalidAmount,
    UnauthorizedRecipient,
    LedgerOperationFailed,
    OutputEncoding,
}

/// Errors returned to the VM by the bank precompile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    #[error("unknown method: 0x{}", hex::encode(.selector))]
    UnknownMethod { selector: Vec<u8> },

    #[error("the method {method} is not readonly")]
    ReadOnlyViolation { method: &'static str },

    #[error("fail to unpack input arguments: {0}")]
    MalformedArguments(#[from] AbiError),

    #[error("invalid amount")]
    InvalidAmount,

    #[error("{0} is not allowed to receive funds")]
    UnauthorizedRecipient(Address),

    #[error("{0}")]
    LedgerOperationFailed(#[from] LedgerError),

    #[error("fail to pack output values: {0}")]
    OutputEncoding(#[source] AbiError),
}

impl PrecompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownMethod { .. } => ErrorKind::UnknownMethod,
            Self::ReadOnlyViolation { .. } => ErrorKind::ReadOnlyViolation,
            Self::MalformedArguments(_) => ErrorKind::MalformedArguments,
            Self::InvalidAmount => ErrorKind::InvalidAmount,
            Self::UnauthorizedRecipient(_) => ErrorKind::UnauthorizedRecipient,
            Self::LedgerOperationFailed(_) => ErrorKind::LedgerOperationFailed,
            Self::OutputEncoding(_) => ErrorKind::OutputEncoding,
        }
    }
}

pub type PrecompileResult<T> = Result<T, PrecompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = PrecompileError::UnknownMethod {
            selector: vec![0xde, 0xad, 0xbe, 0xef],
        };
        assert_eq!(err.to_string(), "unknown method: 0xdeadbeef");
        assert_eq!(err.kind(), ErrorKind::UnknownMethod);

        let err = PrecompileError::ReadOnlyViolation { method: "mint" };
        assert_eq!(err.to_string(), "the method mint is not readonly");
    }

    #[test]
    fn test_ledger_error_converts() {
        let err: PrecompileError = LedgerError::SendDisabled("evm/0x01".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::LedgerOperationFailed);
        assert_eq!(err.to_string(), "evm/0x01 transfers are currently disabled");
    }
}
