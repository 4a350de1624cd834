//! # EVM Bank Ledger
//!
//! The bank ledger the precompile bridges into. It tracks balances per
//! `(address, denom)` and supply per denom, and enforces transfer and
//! blocked-address policy.
//!
//! ## Architecture
//!
//! - **store**: committed state (`BankStore`) and the `ChangeSet`s applied to it
//! - **context**: `LedgerContext`, the explicit transactional handle; contexts
//!   branch and merge so nested operations compose
//! - **keeper**: the `BankKeeper` trait consumed by the precompile
//! - **memory**: `MemoryBankKeeper`, an in-memory implementation with
//!   module accounts, send switches and a blocked list
//!
//! ## Example
//!
//! ```rust
//! use evm_bank_ledger::{BankKeeper, BankStore, LedgerContext, MemoryBankKeeper};
//! use evm_bank_primitives::{Address, Coin};
//!
//! let keeper = MemoryBankKeeper::new();
//! let mut store = BankStore::new();
//! let coins = [Coin::new("stake", 10u32).unwrap()];
//!
//! let changes = {
//!     let mut ctx = LedgerContext::new(&store);
//!     keeper.mint_coins(&mut ctx, "evm", &coins).unwrap();
//!     keeper
//!         .send_coins_from_module_to_account(&mut ctx, "evm", &Address::from_low_byte(1), &coins)
//!         .unwrap();
//!     ctx.into_change_set()
//! };
//! store.apply(changes);
//! assert_eq!(
//!     store.balance(&Address::from_low_byte(1), "stake"),
//!     num_bigint::BigUint::from(10u32)
//! );
//! ```

pub mod context;
pub mod error;
pub mod keeper;
pub mod memory;
pub mod store;

pub use context::LedgerContext;
pub use error::{LedgerError, LedgerResult, LedgerResultExt};
pub use keeper::{module_address, BankKeeper};
pub use memory::{MemoryBankKeeper, ModuleAccount, ModulePermission};
pub use store::{BankStore, ChangeSet, ReadStore, StoreKey};
