//! A fungible amount of a single denomination.

use crate::error::{PrimitiveError, PrimitiveResult};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

/// A pair of denomination and non-negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coin {
    /// The denomination of the asset.
    pub denom: String,

    /// The amount held, always non-negative.
    pub amount: BigUint,
}

impl Coin {
    /// Creates a new coin.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` when the denomination is empty
    /// or contains whitespace.
    pub fn new(denom: impl Into<String>, amount: impl Into<BigUint>) -> PrimitiveResult<Self> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self {
            denom,
            amount: amount.into(),
        })
    }

    /// A zero amount of `denom`.
    pub fn zero(denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: BigUint::zero(),
        }
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        !self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Checks that a denomination is non-empty and free of whitespace.
pub fn validate_denom(denom: &str) -> PrimitiveResult<()> {
    if denom.is_empty() {
        return Err(PrimitiveError::invalid_format("empty denomination"));
    }
    if denom.chars().any(char::is_whitespace) {
        return Err(PrimitiveError::invalid_format(format!(
            "denomination contains whitespace: {denom:?}"
        )));
    }
    Ok(())
}
