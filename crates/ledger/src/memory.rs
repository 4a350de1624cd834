//! In-memory bank keeper.
//!
//! Balances and supplies live in whatever `LedgerContext` the caller passes
//! in; the keeper itself only holds policy: module accounts and their
//! permissions, the send-enabled switches and the blocked-address list.

use crate::context::LedgerContext;
use crate::error::{LedgerError, LedgerResult};
use crate::keeper::{module_address, BankKeeper};
use crate::store::{BankStore, StoreKey};
use evm_bank_config::{GenesisConfig, EVM_MODULE_NAME};
use evm_bank_primitives::{Address, Coin};
use hashbrown::{HashMap, HashSet};
use num_bigint::BigUint;
use parking_lot::RwLock;
use tracing::debug;

/// Capabilities a module account can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulePermission {
    Minter,
    Burner,
}

impl ModulePermission {
    fn verb(self) -> &'static str {
        match self {
            ModulePermission::Minter => "mint",
            ModulePermission::Burner => "burn",
        }
    }
}

/// A named account owned by a module rather than a key holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAccount {
    pub name: String,
    pub address: Address,
    pub permissions: Vec<ModulePermission>,
}

impl ModuleAccount {
    pub fn new(name: impl Into<String>, permissions: Vec<ModulePermission>) -> Self {
        let name = name.into();
        Self {
            address: module_address(&name),
            name,
            permissions,
        }
    }

    pub fn has_permission(&self, permission: ModulePermission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[derive(Debug, Clone)]
struct SendParams {
    default_enabled: bool,
    per_denom: HashMap<String, bool>,
}

impl SendParams {
    fn is_enabled(&self, denom: &str) -> bool {
        self.per_denom
            .get(denom)
            .copied()
            .unwrap_or(self.default_enabled)
    }
}

/// Bank keeper backed by in-memory policy.
pub struct MemoryBankKeeper {
    modules: HashMap<String, ModuleAccount>,
    send_params: RwLock<SendParams>,
    blocked: RwLock<HashSet<Address>>,
}

impl Default for MemoryBankKeeper {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBankKeeper {
    /// Creates a keeper with the `evm` module registered as minter and burner.
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
            send_params: RwLock::new(SendParams {
                default_enabled: true,
                per_denom: HashMap::new(),
            }),
            blocked: RwLock::new(HashSet::new()),
        }
        .with_module(ModuleAccount::new(
            EVM_MODULE_NAME,
            vec![ModulePermission::Minter, ModulePermission::Burner],
        ))
    }

    /// Registers (or replaces) a module account.
    pub fn with_module(mut self, account: ModuleAccount) -> Self {
        self.modules.insert(account.name.clone(), account);
        self
    }

    /// Builds the keeper policy and the initial store from a genesis document.
    pub fn from_genesis(genesis: &GenesisConfig) -> LedgerResult<(Self, BankStore)> {
        let keeper = Self::new();
        keeper.set_default_send_enabled(genesis.default_send_enabled);
        for entry in &genesis.send_enabled {
            keeper.set_send_enabled(&entry.denom, entry.enabled);
        }
        for address in &genesis.blocked_addresses {
            keeper.block_address(*address);
        }

        let mut store = BankStore::new();
        let changes = {
            let mut ctx = LedgerContext::new(&store);
            for balance in &genesis.balances {
                let amount = balance
                    .parsed_amount()
                    .map_err(|e| LedgerError::InvalidCoins(e.to_string()))?;
                let current = ctx.balance(&balance.address, &balance.denom);
                ctx.set_balance(&balance.address, &balance.denom, &current + &amount);
                let supply = ctx.supply(&balance.denom);
                ctx.set_supply(&balance.denom, supply + amount);
            }
            ctx.into_change_set()
        };
        store.apply(changes);
        debug!(entries = store.len(), "bank genesis loaded");
        Ok((keeper, store))
    }

    pub fn set_default_send_enabled(&self, enabled: bool) {
        self.send_params.write().default_enabled = enabled;
    }

    pub fn set_send_enabled(&self, denom: &str, enabled: bool) {
        self.send_params
            .write()
            .per_denom
            .insert(denom.to_string(), enabled);
    }

    pub fn block_address(&self, address: Address) {
        self.blocked.write().insert(address);
    }

    pub fn unblock_address(&self, address: &Address) {
        self.blocked.write().remove(address);
    }

    pub fn module_account(&self, name: &str) -> LedgerResult<&ModuleAccount> {
        self.modules
            .get(name)
            .ok_or_else(|| LedgerError::UnknownModule(name.to_string()))
    }

    fn require_permission(
        &self,
        name: &str,
        permission: ModulePermission,
    ) -> LedgerResult<&ModuleAccount> {
        let account = self.module_account(name)?;
        if !account.has_permission(permission) {
            return Err(LedgerError::MissingPermission {
                module: name.to_string(),
                permission: permission.verb(),
            });
        }
        Ok(account)
    }

    fn validate_coins(coins: &[Coin]) -> LedgerResult<()> {
        if coins.is_empty() {
            return Err(LedgerError::InvalidCoins("empty coin set".to_string()));
        }
        for coin in coins {
            if !coin.is_positive() {
                return Err(LedgerError::InvalidCoins(format!(
                    "non-positive amount {coin}"
                )));
            }
        }
        Ok(())
    }

    fn add_coins(ctx: &mut LedgerContext<'_>, address: &Address, coins: &[Coin]) {
        for coin in coins {
            let balance = ctx.balance(address, &coin.denom);
            ctx.set_balance(address, &coin.denom, balance + &coin.amount);
        }
    }

    fn sub_coins(
        ctx: &mut LedgerContext<'_>,
        address: &Address,
        coins: &[Coin],
    ) -> LedgerResult<()> {
        for coin in coins {
            let balance = ctx.balance(address, &coin.denom);
            if balance < coin.amount {
                return Err(LedgerError::InsufficientFunds {
                    address: *address,
                    denom: coin.denom.clone(),
                    available: balance,
                    required: coin.amount.clone(),
                });
            }
            ctx.set_balance(address, &coin.denom, balance - &coin.amount);
        }
        Ok(())
    }

    fn transfer(
        ctx: &mut LedgerContext<'_>,
        from: &Address,
        to: &Address,
        coins: &[Coin],
    ) -> LedgerResult<()> {
        Self::validate_coins(coins)?;
        Self::sub_coins(ctx, from, coins)?;
        Self::add_coins(ctx, to, coins);
        Ok(())
    }
}

impl BankKeeper for MemoryBankKeeper {
    fn is_send_enabled_coins(&self, _ctx: &LedgerContext<'_>, coins: &[Coin]) -> LedgerResult<()> {
        let params = self.send_params.read();
        for coin in coins {
            if !params.is_enabled(&coin.denom) {
                return Err(LedgerError::SendDisabled(coin.denom.clone()));
            }
        }
        Ok(())
    }

    fn mint_coins(
        &self,
        ctx: &mut LedgerContext<'_>,
        module: &str,
        coins: &[Coin],
    ) -> LedgerResult<()> {
        let account = self.require_permission(module, ModulePermission::Minter)?;
        Self::validate_coins(coins)?;
        Self::add_coins(ctx, &account.address, coins);
        for coin in coins {
            let supply = ctx.supply(&coin.denom);
            ctx.set_supply(&coin.denom, supply + &coin.amount);
            debug!(module, coin = %coin, "minted coins");
        }
        Ok(())
    }

    fn burn_coins(
        &self,
        ctx: &mut LedgerContext<'_>,
        module: &str,
        coins: &[Coin],
    ) -> LedgerResult<()> {
        let account = self.require_permission(module, ModulePermission::Burner)?;
        Self::validate_coins(coins)?;
        Self::sub_coins(ctx, &account.address, coins)?;
        for coin in coins {
            let supply = ctx.supply(&coin.denom);
            if supply < coin.amount {
                return Err(LedgerError::InvalidCoins(format!(
                    "burning {coin} exceeds supply {supply}"
                )));
            }
            ctx.set_supply(&coin.denom, supply - &coin.amount);
            debug!(module, coin = %coin, "burned coins");
        }
        Ok(())
    }

    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut LedgerContext<'_>,
        module: &str,
        recipient: &Address,
        coins: &[Coin],
    ) -> LedgerResult<()> {
        let account = self.module_account(module)?;
        if self.blocked_addr(recipient) {
            return Err(LedgerError::Unauthorized(*recipient));
        }
        Self::transfer(ctx, &account.address, recipient, coins)
    }

    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut LedgerContext<'_>,
        sender: &Address,
        module: &str,
        coins: &[Coin],
    ) -> LedgerResult<()> {
        let account = self.module_account(module)?;
        Self::transfer(ctx, sender, &account.address, coins)
    }

    fn send_coins(
        &self,
        ctx: &mut LedgerContext<'_>,
        from: &Address,
        to: &Address,
        coins: &[Coin],
    ) -> LedgerResult<()> {
        Self::transfer(ctx, from, to, coins)
    }

    fn get_balance(&self, ctx: &LedgerContext<'_>, address: &Address, denom: &str) -> Coin {
        Coin {
            denom: denom.to_string(),
            amount: ctx.balance(address, denom),
        }
    }

    fn get_supply(&self, ctx: &LedgerContext<'_>, denom: &str) -> Coin {
        Coin {
            denom: denom.to_string(),
            amount: ctx.supply(denom),
        }
    }

    fn blocked_addr(&self, address: &Address) -> bool {
        if self.blocked.read().contains(address) {
            return true;
        }
        self.modules.values().any(|m| &m.address == address)
    }
}
