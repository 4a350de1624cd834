//! # EVM Bank Primitives
//!
//! Fundamental value types shared by the bank precompile and its ledger:
//! - `Address`: 20-byte account identifier, identical on the EVM and ledger sides
//! - `Coin`: a denomination paired with an arbitrary-precision amount
//!
//! ## Example
//!
//! ```rust
//! use evm_bank_primitives::{Address, Coin};
//!
//! let bank = Address::from_low_byte(100);
//! assert_eq!(bank.to_string(), "0x0000000000000000000000000000000000000064");
//!
//! let coin = Coin::new("stake", 5u32).unwrap();
//! assert!(coin.is_positive());
//! ```

pub mod address;
pub mod coin;
pub mod constants;
pub mod error;

// Re-exports
pub use address::Address;
pub use coin::{validate_denom, Coin};
pub use constants::*;
pub use error::{PrimitiveError, PrimitiveResult};
