//! # EVM Bank: a native bank precompile for EVM chains
//!
//! Contracts running in the EVM call a precompile at a fixed address to mint,
//! burn, transfer and query a fungible asset held in the chain's native bank
//! ledger. Each calling contract owns exactly one denomination,
//! `evm/0x<contract address>`, and can only move that asset.
//!
//! ## Quick Start
//!
//! ```rust
//! use evm_bank::prelude::*;
//!
//! let precompiles = evm_bank::bank_precompiles(MemoryBankKeeper::new(), PrecompileConfig::default());
//! let mut state = JournaledState::default();
//!
//! let token = Address::from_low_byte(0xc0);
//! let mut input = Method::Mint.signature().selector.to_vec();
//! input.extend_from_slice(&Address::from_low_byte(1).to_word());
//! let mut amount = [0u8; 32];
//! amount[31] = 100;
//! input.extend_from_slice(&amount);
//!
//! let call = CallContext::new(token, input, false);
//! let result = precompiles.call(&BANK_CONTRACT_ADDRESS, &mut state, &call);
//! assert_eq!(result, Some(Ok(Vec::new())));
//! assert_eq!(
//!     state.store().balance(&Address::from_low_byte(1), &denom_of(&token)),
//!     num_bigint::BigUint::from(100u32)
//! );
//! ```
//!
//! ## Architecture
//!
//! - [`primitives`] - `Address`, `Coin` and wire sizes
//! - [`config`] - protocol constants, precompile and genesis configuration
//! - [`ledger`] - the bank keeper interface and an in-memory ledger
//! - [`precompile`] - the contract, its codec and the state bridge

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use evm_bank_config as config;
pub use evm_bank_ledger as ledger;
pub use evm_bank_precompile as precompile;
pub use evm_bank_primitives as primitives;

/// Common imports for embedding the bank precompile
pub mod prelude {
    pub use crate::config::{GenesisConfig, PrecompileConfig, BANK_CONTRACT_ADDRESS};
    pub use crate::ledger::{BankKeeper, BankStore, LedgerContext, MemoryBankKeeper};
    pub use crate::precompile::{
        denom_of, BankContract, CallContext, ErrorKind, ExtStateDb, JournaledState, Method,
        PrecompileError, PrecompileSet, PrecompiledContract,
    };
    pub use crate::primitives::{Address, Coin};
}

/// Builds a precompile set holding only the bank contract.
pub fn bank_precompiles<K>(keeper: K, config: config::PrecompileConfig) -> precompile::PrecompileSet
where
    K: ledger::BankKeeper + Send + Sync + 'static,
{
    let mut set = precompile::PrecompileSet::new();
    set.register(precompile::BankContract::with_config(keeper, config));
    set
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_bank_precompiles_registers_configured_address() {
        let config = PrecompileConfig {
            address: Address::from_low_byte(0x70),
            ..PrecompileConfig::default()
        };
        let set = super::bank_precompiles(MemoryBankKeeper::new(), config);
        assert!(set.contains(&Address::from_low_byte(0x70)));
        assert!(!set.contains(&BANK_CONTRACT_ADDRESS));
    }

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
