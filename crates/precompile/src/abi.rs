//! Fixed-width argument codec.
//!
//! Every value occupies one 32-byte word:
//! - `address`: low 20 bytes, the 12 high bytes zero
//! - `uint256`: big-endian unsigned integer
//!
//! Decoding reads one word per declared parameter and ignores trailing bytes.

use crate::error::{AbiError, AbiResult};
use evm_bank_primitives::{Address, WORD_SIZE};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// Largest value representable as `uint256`.
pub static UINT256_MAX: Lazy<BigUint> = Lazy::new(|| (BigUint::from(1u8) << 256u32) - 1u8);

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    Uint256,
}

impl ParamType {
    /// Name used in the canonical method signature.
    pub fn canonical_name(self) -> &'static str {
        match self {
            ParamType::Address => "address",
            ParamType::Uint256 => "uint256",
        }
    }
}

/// A named, typed parameter of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamType,
}

impl Param {
    /// An `address` parameter.
    pub const fn address(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamType::Address,
        }
    }

    /// A `uint256` parameter.
    pub const fn uint256(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamType::Uint256,
        }
    }
}

/// A decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(BigUint),
}

impl Token {
    /// The parameter type this value encodes as.
    pub fn kind(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::Address,
            Token::Uint(_) => ParamType::Uint256,
        }
    }
}

/// Number of payload bytes a parameter list requires.
pub fn encoded_len(params: &[Param]) -> usize {
    params.len() * WORD_SIZE
}

/// Decodes `data` according to `params`.
pub fn decode(data: &[u8], params: &[Param]) -> AbiResult<Vec<Token>> {
    let expected = encoded_len(params);
    if data.len() < expected {
        return Err(AbiError::InsufficientData {
            expected,
            actual: data.len(),
        });
    }

    params
        .iter()
        .zip(data.chunks_exact(WORD_SIZE))
        .enumerate()
        .map(|(index, (param, chunk))| {
            let mut word = [0u8; WORD_SIZE];
            word.copy_from_slice(chunk);
            decode_word(index, param.kind, &word)
        })
        .collect()
}

fn decode_word(index: usize, kind: ParamType, word: &[u8; WORD_SIZE]) -> AbiResult<Token> {
    match kind {
        ParamType::Address => Address::from_word(word)
            .map(Token::Address)
            .map_err(|_| AbiError::InvalidAddressPadding { index }),
        ParamType::Uint256 => Ok(Token::Uint(BigUint::from_bytes_be(word))),
    }
}

/// Encodes `tokens` according to `params`. Empty parameter lists encode to
/// an empty buffer.
pub fn encode(tokens: &[Token], params: &[Param]) -> AbiResult<Vec<u8>> {
    if tokens.len() != params.len() {
        return Err(AbiError::ArityMismatch {
            expected: params.len(),
            actual: tokens.len(),
        });
    }

    let mut out = Vec::with_capacity(encoded_len(params));
    for (index, (token, param)) in tokens.iter().zip(params).enumerate() {
        if token.kind() != param.kind {
            return Err(AbiError::TypeMismatch {
                index,
                expected: param.kind.canonical_name(),
            });
        }
        let word = match token {
            Token::Address(address) => address.to_word(),
            Token::Uint(value) => encode_uint(index, value)?,
        };
        out.extend_from_slice(&word);
    }
    Ok(out)
}

fn encode_uint(index: usize, value: &BigUint) -> AbiResult<[u8; WORD_SIZE]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > WORD_SIZE {
        return Err(AbiError::UintOverflow { index });
    }
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}
