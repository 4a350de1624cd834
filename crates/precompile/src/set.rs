//! Address-keyed routing of calls to registered precompiles.

use crate::contract::{CallContext, PrecompiledContract};
use crate::error::PrecompileResult;
use crate::state::ExtStateDb;
use evm_bank_primitives::Address;
use hashbrown::HashMap;
use tracing::{debug, warn};

/// The precompiles active in a VM instance.
#[derive(Default)]
pub struct PrecompileSet {
    contracts: HashMap<Address, Box<dyn PrecompiledContract>>,
}

impl PrecompileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `contract` at its own address, replacing any previous entry.
    pub fn register<C>(&mut self, contract: C) -> &mut Self
    where
        C: PrecompiledContract + 'static,
    {
        let address = contract.address();
        if self.contracts.insert(address, Box::new(contract)).is_some() {
            warn!(address = %address, "replaced existing precompile");
        } else {
            debug!(address = %address, "registered precompile");
        }
        self
    }

    pub fn get(&self, address: &Address) -> Option<&dyn PrecompiledContract> {
        self.contracts.get(address).map(|c| c.as_ref())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.contracts.contains_key(address)
    }

    /// Registered addresses in ascending order.
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self.contracts.keys().copied().collect();
        addresses.sort();
        addresses
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Gas the contract at `address` charges for `input`.
    pub fn required_gas(&self, address: &Address, input: &[u8]) -> Option<u64> {
        self.get(address).map(|c| c.required_gas(input))
    }

    /// Runs the contract at `address`. `None` means no precompile lives there
    /// and the VM should treat the call as an ordinary one.
    pub fn call(
        &self,
        address: &Address,
        state: &mut dyn ExtStateDb,
        call: &CallContext,
    ) -> Option<PrecompileResult<Vec<u8>>> {
        let contract = self.get(address)?;
        Some(contract.run(state, call))
    }
}

impl std::fmt::Debug for PrecompileSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecompileSet")
            .field("addresses", &self.addresses())
            .finish()
    }
}
