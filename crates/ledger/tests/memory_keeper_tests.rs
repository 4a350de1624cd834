use evm_bank_config::{GenesisBalance, GenesisConfig, SendEnabled};
use evm_bank_ledger::{
    module_address, BankKeeper, BankStore, LedgerContext, LedgerError, MemoryBankKeeper,
};
use evm_bank_primitives::{Address, Coin};
use num_bigint::BigUint;
use proptest::prelude::*;

const DENOM: &str = "evm/0x00000000000000000000000000000000000000c0";

fn addr(b: u8) -> Address {
    Address::from_low_byte(b)
}

fn coins(amount: u64) -> [Coin; 1] {
    [Coin::new(DENOM, amount).unwrap()]
}

fn genesis(entries: &[(u8, u64)]) -> GenesisConfig {
    GenesisConfig {
        balances: entries
            .iter()
            .map(|(who, amount)| GenesisBalance {
                address: addr(*who),
                denom: DENOM.to_string(),
                amount: amount.to_string(),
            })
            .collect(),
        ..GenesisConfig::default()
    }
}

/// Runs `f` in a fresh context and applies its writes only on success.
fn commit<F>(store: &mut BankStore, f: F) -> Result<(), LedgerError>
where
    F: FnOnce(&mut LedgerContext<'_>) -> Result<(), LedgerError>,
{
    let changes = {
        let mut ctx = LedgerContext::new(&*store);
        f(&mut ctx)?;
        ctx.into_change_set()
    };
    store.apply(changes);
    Ok(())
}

#[test]
fn test_genesis_seeds_balances_and_supply() {
    let (keeper, store) = MemoryBankKeeper::from_genesis(&genesis(&[(1, 70), (2, 30), (1, 5)])).unwrap();
    assert_eq!(store.balance(&addr(1), DENOM), BigUint::from(75u32));
    assert_eq!(store.supply(DENOM), BigUint::from(105u32));
    assert!(!keeper.blocked_addr(&addr(1)));
}

#[test]
fn test_genesis_policy() {
    let mut config = genesis(&[]);
    config.blocked_addresses.push(addr(9));
    config.default_send_enabled = false;
    config.send_enabled.push(SendEnabled {
        denom: DENOM.to_string(),
        enabled: true,
    });
    let (keeper, store) = MemoryBankKeeper::from_genesis(&config).unwrap();
    let ctx = LedgerContext::new(&store);

    assert!(keeper.blocked_addr(&addr(9)));
    assert!(keeper.is_send_enabled_coins(&ctx, &coins(1)).is_ok());
    assert_eq!(
        keeper.is_send_enabled_coins(&ctx, &[Coin::new("other", 1u32).unwrap()]),
        Err(LedgerError::SendDisabled("other".to_string()))
    );
}

#[test]
fn test_mint_send_burn_lifecycle() {
    let keeper = MemoryBankKeeper::new();
    let mut store = BankStore::new();

    commit(&mut store, |ctx| {
        keeper.mint_coins(ctx, "evm", &coins(50))?;
        keeper.send_coins_from_module_to_account(ctx, "evm", &addr(1), &coins(50))
    })
    .unwrap();
    assert_eq!(store.supply(DENOM), BigUint::from(50u32));

    commit(&mut store, |ctx| {
        keeper.send_coins_from_account_to_module(ctx, &addr(1), "evm", &coins(20))?;
        keeper.burn_coins(ctx, "evm", &coins(20))
    })
    .unwrap();

    assert_eq!(store.balance(&addr(1), DENOM), BigUint::from(30u32));
    assert_eq!(store.balance(&module_address("evm"), DENOM), BigUint::from(0u32));
    assert_eq!(store.supply(DENOM), BigUint::from(30u32));
}

#[test]
fn test_unknown_module_and_failed_commit() {
    let keeper = MemoryBankKeeper::new();
    let mut store = BankStore::new();

    let err = commit(&mut store, |ctx| {
        keeper.mint_coins(ctx, "evm", &coins(5))?;
        keeper.send_coins_from_module_to_account(ctx, "gov", &addr(1), &coins(5))
    })
    .unwrap_err();
    assert_eq!(err, LedgerError::UnknownModule("gov".to_string()));
    assert!(store.is_empty());
}

proptest! {
    #[test]
    fn test_sends_conserve_total(
        transfers in prop::collection::vec((0u8..3, 0u8..3, 1u64..40), 0..30)
    ) {
        let keeper = MemoryBankKeeper::new();
        let (_, mut store) = MemoryBankKeeper::from_genesis(&genesis(&[(0, 100), (1, 100), (2, 100)])).unwrap();

        for (from, to, amount) in transfers {
            let _ = commit(&mut store, |ctx| {
                keeper.send_coins(ctx, &addr(from), &addr(to), &coins(amount))
            });
        }

        let total: BigUint = (0u8..3).map(|who| store.balance(&addr(who), DENOM)).sum();
        prop_assert_eq!(total, BigUint::from(300u32));
        prop_assert_eq!(store.supply(DENOM), BigUint::from(300u32));
    }
}
