use evm_bank::prelude::*;
use num_bigint::BigUint;

fn word_uint(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn encode(method: Method, words: &[[u8; 32]]) -> Vec<u8> {
    let mut data = method.signature().selector.to_vec();
    for word in words {
        data.extend_from_slice(word);
    }
    data
}

#[test]
fn test_token_lifecycle() {
    let precompiles = evm_bank::bank_precompiles(MemoryBankKeeper::new(), PrecompileConfig::default());
    let mut state = JournaledState::default();
    let token = Address::from_low_byte(0xc0);
    let alice = Address::from_low_byte(0xa1);
    let bob = Address::from_low_byte(0xb0);

    let run = |state: &mut JournaledState, method: Method, words: &[[u8; 32]], read_only: bool| {
        let call = CallContext::new(token, encode(method, words), read_only);
        precompiles
            .call(&BANK_CONTRACT_ADDRESS, state, &call)
            .expect("bank precompile is registered")
    };

    run(&mut state, Method::Mint, &[alice.to_word(), word_uint(1_000)], false).unwrap();
    run(
        &mut state,
        Method::Transfer,
        &[alice.to_word(), bob.to_word(), word_uint(250)],
        false,
    )
    .unwrap();
    run(&mut state, Method::Burn, &[bob.to_word(), word_uint(50)], false).unwrap();

    let alice_balance = run(
        &mut state,
        Method::BalanceOf,
        &[token.to_word(), alice.to_word()],
        true,
    )
    .unwrap();
    assert_eq!(alice_balance, word_uint(750).to_vec());

    let denom = denom_of(&token);
    assert_eq!(state.store().balance(&bob, &denom), BigUint::from(200u32));
    assert_eq!(state.store().supply(&denom), BigUint::from(950u32));
    assert_eq!(state.commit(), 3);

    let err = run(
        &mut state,
        Method::Transfer,
        &[bob.to_word(), alice.to_word(), word_uint(201)],
        false,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LedgerOperationFailed);
    assert_eq!(state.store().balance(&bob, &denom), BigUint::from(200u32));
}

#[test]
fn test_assets_are_isolated_per_caller() {
    let precompiles = evm_bank::bank_precompiles(MemoryBankKeeper::new(), PrecompileConfig::default());
    let mut state = JournaledState::default();
    let holder = Address::from_low_byte(0x11);
    let first = Address::from_low_byte(0x01);
    let second = Address::from_low_byte(0x02);

    let mint = CallContext::new(first, encode(Method::Mint, &[holder.to_word(), word_uint(10)]), false);
    precompiles
        .call(&BANK_CONTRACT_ADDRESS, &mut state, &mint)
        .unwrap()
        .unwrap();

    // the second contract cannot move the first contract's asset
    let steal = CallContext::new(
        second,
        encode(
            Method::Transfer,
            &[holder.to_word(), second.to_word(), word_uint(10)],
        ),
        false,
    );
    let err = precompiles
        .call(&BANK_CONTRACT_ADDRESS, &mut state, &steal)
        .unwrap()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LedgerOperationFailed);
    assert_eq!(
        state.store().balance(&holder, &denom_of(&first)),
        BigUint::from(10u32)
    );
}
