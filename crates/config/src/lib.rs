//! EVM Bank Configuration Module
//!
//! Protocol constants for the bank precompile plus the TOML-backed settings
//! used to wire it into a host: the contract configuration and the genesis
//! state of the in-memory ledger.

use evm_bank_primitives::{validate_denom, Address};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub use evm_bank_primitives::{ADDRESS_SIZE, SELECTOR_SIZE, WORD_SIZE};

/// Low byte of the bank precompile address (`0x…64`).
pub const BANK_CONTRACT_ADDRESS_BYTE: u8 = 100;

/// Flat gas charged for every call, independent of input.
pub const BANK_CONTRACT_REQUIRED_GAS: u64 = 10_000;

/// Prefix of every denomination derived from an EVM address.
pub const EVM_DENOM_PREFIX: &str = "evm/";

/// Name of the ledger module that holds minted funds in transit.
pub const EVM_MODULE_NAME: &str = "evm";

/// The fixed address the VM uses to reach the bank precompile.
pub const BANK_CONTRACT_ADDRESS: Address = Address::from_low_byte(BANK_CONTRACT_ADDRESS_BYTE);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Bank precompile configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompileConfig {
    /// Address the precompile is registered under.
    pub address: Address,
    /// Gas reported by `required_gas` for every call.
    pub required_gas: u64,
    /// Ledger module that mints and burns on behalf of the precompile.
    pub module_name: String,
}

impl Default for PrecompileConfig {
    fn default() -> Self {
        Self {
            address: BANK_CONTRACT_ADDRESS,
            required_gas: BANK_CONTRACT_REQUIRED_GAS,
            module_name: EVM_MODULE_NAME.to_string(),
        }
    }
}

impl PrecompileConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }

    /// Rejects settings the precompile cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.address.is_zero() {
            return Err(ConfigError::Invalid(
                "precompile address must not be zero".to_string(),
            ));
        }
        if self.module_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "module name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single genesis balance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBalance {
    pub address: Address,
    pub denom: String,
    /// Decimal string, so amounts beyond `u64` survive TOML.
    pub amount: String,
}

impl GenesisBalance {
    /// Parses the decimal amount.
    pub fn parsed_amount(&self) -> ConfigResult<BigUint> {
        BigUint::from_str(self.amount.trim()).map_err(|e| {
            ConfigError::Invalid(format!(
                "balance of {} in {}: invalid amount {:?}: {}",
                self.address, self.denom, self.amount, e
            ))
        })
    }
}

/// Per-denomination send switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEnabled {
    pub denom: String,
    pub enabled: bool,
}

/// Initial ledger state and policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    pub balances: Vec<GenesisBalance>,
    pub blocked_addresses: Vec<Address>,
    pub default_send_enabled: bool,
    pub send_enabled: Vec<SendEnabled>,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            balances: Vec::new(),
            blocked_addresses: Vec::new(),
            default_send_enabled: true,
            send_enabled: Vec::new(),
        }
    }
}

impl GenesisConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let genesis: Self = toml::from_str(s)?;
        genesis.validate()?;
        Ok(genesis)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }

    /// Checks every denomination and amount.
    pub fn validate(&self) -> ConfigResult<()> {
        for balance in &self.balances {
            validate_denom(&balance.denom)
                .map_err(|e| ConfigError::Invalid(format!("balance of {}: {}", balance.address, e)))?;
            balance.parsed_amount()?;
        }
        for entry in &self.send_enabled {
            validate_denom(&entry.denom)
                .map_err(|e| ConfigError::Invalid(format!("send_enabled: {}", e)))?;
        }
        Ok(())
    }
}
