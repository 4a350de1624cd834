use thiserror::Error;

/// Errors raised while building primitive values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

impl PrimitiveError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}

pub type PrimitiveResult<T> = Result<T, PrimitiveError>;
