//! The bank keeper interface consumed by the precompile.

use crate::context::LedgerContext;
use crate::error::LedgerResult;
use evm_bank_primitives::{Address, Coin, ADDRESS_SIZE};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Bank operations exposed by the ledger subsystem.
///
/// Every state access goes through the `LedgerContext` handed in by the
/// caller, so the caller decides whether the writes are kept or dropped.
/// Policy lookups (`blocked_addr`) do not touch balances and take no context.
pub trait BankKeeper {
    /// Fails if any coin's denomination has transfers disabled.
    fn is_send_enabled_coins(&self, ctx: &LedgerContext<'_>, coins: &[Coin]) -> LedgerResult<()>;

    /// Creates `coins` in the module account and grows their supply.
    fn mint_coins(
        &self,
        ctx: &mut LedgerContext<'_>,
        module: &str,
        coins: &[Coin],
    ) -> LedgerResult<()>;

    /// Destroys `coins` held by the module account and shrinks their supply.
    fn burn_coins(
        &self,
        ctx: &mut LedgerContext<'_>,
        module: &str,
        coins: &[Coin],
    ) -> LedgerResult<()>;

    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut LedgerContext<'_>,
        module: &str,
        recipient: &Address,
        coins: &[Coin],
    ) -> LedgerResult<()>;

    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut LedgerContext<'_>,
        sender: &Address,
        module: &str,
        coins: &[Coin],
    ) -> LedgerResult<()>;

    fn send_coins(
        &self,
        ctx: &mut LedgerContext<'_>,
        from: &Address,
        to: &Address,
        coins: &[Coin],
    ) -> LedgerResult<()>;

    /// Balance of `denom` held by `address`; a zero coin when absent.
    fn get_balance(&self, ctx: &LedgerContext<'_>, address: &Address, denom: &str) -> Coin;

    /// Total supply of `denom`.
    fn get_supply(&self, ctx: &LedgerContext<'_>, denom: &str) -> Coin;

    /// True if `address` may not receive funds.
    fn blocked_addr(&self, address: &Address) -> bool;
}

macro_rules! forward_bank_keeper {
    ($($ty:ty),+) => {$(
        impl<K: BankKeeper + ?Sized> BankKeeper for $ty {
            fn is_send_enabled_coins(&self, ctx: &LedgerContext<'_>, coins: &[Coin]) -> LedgerResult<()> {
                (**self).is_send_enabled_coins(ctx, coins)
            }

            fn mint_coins(&self, ctx: &mut LedgerContext<'_>, module: &str, coins: &[Coin]) -> LedgerResult<()> {
                (**self).mint_coins(ctx, module, coins)
            }

            fn burn_coins(&self, ctx: &mut LedgerContext<'_>, module: &str, coins: &[Coin]) -> LedgerResult<()> {
                (**self).burn_coins(ctx, module, coins)
            }

            fn send_coins_from_module_to_account(
                &self,
                ctx: &mut LedgerContext<'_>,
                module: &str,
                recipient: &Address,
                coins: &[Coin],
            ) -> LedgerResult<()> {
                (**self).send_coins_from_module_to_account(ctx, module, recipient, coins)
            }

            fn send_coins_from_account_to_module(
                &self,
                ctx: &mut LedgerContext<'_>,
                sender: &Address,
                module: &str,
                coins: &[Coin],
            ) -> LedgerResult<()> {
                (**self).send_coins_from_account_to_module(ctx, sender, module, coins)
            }

            fn send_coins(
                &self,
                ctx: &mut LedgerContext<'_>,
                from: &Address,
                to: &Address,
                coins: &[Coin],
            ) -> LedgerResult<()> {
                (**self).send_coins(ctx, from, to, coins)
            }

            fn get_balance(&self, ctx: &LedgerContext<'_>, address: &Address, denom: &str) -> Coin {
                (**self).get_balance(ctx, address, denom)
            }

            fn get_supply(&self, ctx: &LedgerContext<'_>, denom: &str) -> Coin {
                (**self).get_supply(ctx, denom)
            }

            fn blocked_addr(&self, address: &Address) -> bool {
                (**self).blocked_addr(address)
            }
        }
    )+};
}

forward_bank_keeper!(&K, Arc<K>, Box<K>);

/// Address of a module account: the first 20 bytes of `sha256(name)`.
pub fn module_address(name: &str) -> Address {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; ADDRESS_SIZE];
    bytes.copy_from_slice(&digest[..ADDRESS_SIZE]);
    Address::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_address_is_stable() {
        assert_eq!(module_address("evm"), module_address("evm"));
        assert_ne!(module_address("evm"), module_address("gov"));
        assert!(!module_address("evm").is_zero());
    }
}
