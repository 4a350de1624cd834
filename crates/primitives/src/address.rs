//! Implementation of `Address`, the 20-byte account identifier.
//!
//! The EVM and the bank ledger share the same address space: an `Address`
//! is used on both sides without any hashing or re-encoding.

use crate::constants::{ADDRESS_PADDING, ADDRESS_SIZE, WORD_SIZE};
use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address, stored big-endian as it appears on the wire.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Creates an address from its raw bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the all-zero address.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; ADDRESS_SIZE])
    }

    /// Builds an address whose only non-zero byte is the last one.
    ///
    /// Precompiles live at such low addresses (`0x…64` for the bank).
    #[inline]
    #[must_use]
    pub const fn from_low_byte(byte: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[ADDRESS_SIZE - 1] = byte;
        Self(bytes)
    }

    /// Checks whether every byte is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Creates an address from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` if the slice is not exactly 20 bytes.
    pub fn from_slice(value: &[u8]) -> PrimitiveResult<Self> {
        let bytes: [u8; ADDRESS_SIZE] =
            value
                .try_into()
                .map_err(|_| PrimitiveError::InvalidLength {
                    expected: ADDRESS_SIZE,
                    actual: value.len(),
                })?;
        Ok(Self(bytes))
    }

    /// Decodes an address from a 32-byte ABI word.
    ///
    /// The address occupies the low 20 bytes; the 12 high bytes must be zero.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` if the padding is not zero.
    pub fn from_word(word: &[u8; WORD_SIZE]) -> PrimitiveResult<Self> {
        if word[..ADDRESS_PADDING].iter().any(|b| *b != 0) {
            return Err(PrimitiveError::invalid_format(
                "address word has non-zero padding",
            ));
        }
        Self::from_slice(&word[ADDRESS_PADDING..])
    }

    /// Encodes the address into a left-padded 32-byte ABI word.
    #[must_use]
    pub fn to_word(&self) -> [u8; WORD_SIZE] {
        let mut word = [0u8; WORD_SIZE];
        word[ADDRESS_PADDING..].copy_from_slice(&self.0);
        word
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Lowercase hex with a `0x` prefix.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses a 40-digit hex string, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidHex` for non-hex input and
    /// `PrimitiveError::InvalidLength` when the decoded value is not 20 bytes.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
