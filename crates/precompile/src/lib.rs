//! # EVM Bank Precompile
//!
//! A stateful precompiled contract living at a fixed EVM address. It lets
//! contracts issue and move their own fungible asset on the bank ledger:
//!
//! - `mint(address,uint256)`: create coins of the caller's denomination
//! - `burn(address,uint256)`: destroy coins of the caller's denomination
//! - `balanceOf(address,address)`: read any EVM-issued denomination
//! - `transfer(address,address,uint256)`: move coins of the caller's denomination
//!
//! The caller's denomination is `evm/0x<caller>`, so a contract can only
//! ever touch the asset it issued.
//!
//! ## Architecture
//!
//! - **abi**: 32-byte word codec for `address` and `uint256`
//! - **method**: the method table and selectors
//! - **denom**: address to denomination mapping
//! - **guard**: blocked-recipient check
//! - **state**: [`ExtStateDb`], the bridge that runs ledger logic atomically
//!   with the enclosing VM call
//! - **contract**: [`BankContract`], the dispatcher
//! - **set**: [`PrecompileSet`], routing by address
//!
//! ## Example
//!
//! ```rust
//! use evm_bank_ledger::MemoryBankKeeper;
//! use evm_bank_precompile::{BankContract, CallContext, JournaledState, Method, PrecompiledContract};
//! use evm_bank_primitives::Address;
//!
//! let contract = BankContract::new(MemoryBankKeeper::new());
//! let mut state = JournaledState::default();
//!
//! let mut input = Method::Mint.signature().selector.to_vec();
//! input.extend_from_slice(&Address::from_low_byte(1).to_word());
//! let mut amount = [0u8; 32];
//! amount[31] = 100;
//! input.extend_from_slice(&amount);
//!
//! let token = Address::from_low_byte(0xc0);
//! let output = contract
//!     .run(&mut state, &CallContext::new(token, input, false))
//!     .unwrap();
//! assert!(output.is_empty());
//! ```

pub mod abi;
pub mod contract;
pub mod denom;
pub mod error;
pub mod guard;
pub mod method;
pub mod set;
pub mod state;

pub use abi::{Param, ParamType, Token};
pub use contract::{BankContract, CallContext, PrecompiledContract};
pub use denom::{denom_of, parse_denom};
pub use error::{AbiError, ErrorKind, PrecompileError, PrecompileResult};
pub use method::{registry, selector_of, Method, MethodSignature, Selector};
pub use set::PrecompileSet;
pub use state::{run_atomic, ExtStateDb, JournaledState, NativeAction};

pub use evm_bank_config::{
    BANK_CONTRACT_ADDRESS, BANK_CONTRACT_REQUIRED_GAS, EVM_DENOM_PREFIX, EVM_MODULE_NAME,
};
