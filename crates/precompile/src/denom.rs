//! Denominations of EVM-issued assets.
//!
//! Each contract calling the bank precompile owns exactly one denomination:
//! `evm/` followed by the contract address as lowercase `0x`-prefixed hex.

use evm_bank_config::EVM_DENOM_PREFIX;
use evm_bank_primitives::{Address, ADDRESS_SIZE};

/// Returns the denomination owned by `address`.
pub fn denom_of(address: &Address) -> String {
    format!("{}{}", EVM_DENOM_PREFIX, address.to_hex_string())
}

/// Recovers the issuing address from a denomination built by [`denom_of`].
///
/// Returns `None` for any other string, including upper-case spellings.
pub fn parse_denom(denom: &str) -> Option<Address> {
    let hex_part = denom.strip_prefix(EVM_DENOM_PREFIX)?.strip_prefix("0x")?;
    let canonical = hex_part.len() == ADDRESS_SIZE * 2
        && hex_part
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !canonical {
        return None;
    }
    Address::parse(hex_part).ok()
}
