//! The bank precompile contract.

use crate::abi::{self, Token};
use crate::denom::denom_of;
use crate::error::{AbiError, PrecompileError, PrecompileResult};
use crate::guard::check_recipient;
use crate::method::{self, registry, Method, MethodSignature, Selector};
use crate::state::{run_atomic, ExtStateDb};
use evm_bank_config::PrecompileConfig;
use evm_bank_ledger::{BankKeeper, LedgerResultExt};
use evm_bank_primitives::{Address, Coin, SELECTOR_SIZE};
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::debug;

/// A single call into a precompile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// The contract or account that issued the call.
    pub caller: Address,
    /// Selector followed by encoded arguments.
    pub input: Vec<u8>,
    /// Set when the call runs under a static (read-only) frame.
    pub read_only: bool,
}

impl CallContext {
    /// Wraps one call's caller, payload and static-frame flag.
    pub fn new(caller: Address, input: impl Into<Vec<u8>>, read_only: bool) -> Self {
        Self {
            caller,
            input: input.into(),
            read_only,
        }
    }

    /// The first four bytes of the input, if present.
    pub fn selector(&self) -> Option<Selector> {
        self.input
            .get(..SELECTOR_SIZE)
            .and_then(|bytes| bytes.try_into().ok())
    }

    /// Input after the selector.
    pub fn args(&self) -> &[u8] {
        self.input.get(SELECTOR_SIZE..).unwrap_or_default()
    }
}

/// Trait for contracts executed natively at a fixed address.
pub trait PrecompiledContract: Send + Sync {
    /// Address the VM routes calls to.
    fn address(&self) -> Address;

    /// Gas charged before `run`.
    fn required_gas(&self, input: &[u8]) -> u64;

    /// Whether the contract touches state.
    fn is_stateful(&self) -> bool;

    /// Executes a call, returning the encoded output.
    fn run(&self, state: &mut dyn ExtStateDb, call: &CallContext) -> PrecompileResult<Vec<u8>>;
}

/// Bridges EVM calls to the bank keeper.
///
/// Every contract that calls `mint`, `burn` or `transfer` acts on its own
/// denomination, `denom_of(caller)`. `balanceOf` reads any denomination by
/// token address.
pub struct BankContract<K> {
    keeper: K,
    config: PrecompileConfig,
}

impl<K: BankKeeper> BankContract<K> {
    /// Creates the contract at the default address with the default gas.
    pub fn new(keeper: K) -> Self {
        Self::with_config(keeper, PrecompileConfig::default())
    }

    /// Creates the contract with an explicit address, gas and module.
    ///
    /// The method table is built here, so no call pays for it.
    pub fn with_config(keeper: K, config: PrecompileConfig) -> Self {
        method::init();
        Self { keeper, config }
    }

    /// The ledger keeper every call goes through.
    pub fn keeper(&self) -> &K {
        &self.keeper
    }

    /// Active address, gas and module settings.
    pub fn config(&self) -> &PrecompileConfig {
        &self.config
    }

    fn dispatch(
        &self,
        state: &mut dyn ExtStateDb,
        call: &CallContext,
    ) -> PrecompileResult<Vec<u8>> {
        let selector = call
            .selector()
            .ok_or_else(|| PrecompileError::UnknownMethod {
                selector: call.input.clone(),
            })?;
        let method = registry()
            .lookup(&selector)
            .ok_or_else(|| PrecompileError::UnknownMethod {
                selector: selector.to_vec(),
            })?;
        let signature = method.signature();
        debug!(method = signature.name, caller = %call.caller, read_only = call.read_only, "bank precompile call");

        if signature.mutating && call.read_only {
            return Err(PrecompileError::ReadOnlyViolation {
                method: signature.name,
            });
        }

        let args = abi::decode(call.args(), &signature.inputs)?;
        let outputs = match method {
            Method::Mint => self.mint(state, call, &args)?,
            Method::Burn => self.burn(state, call, &args)?,
            Method::BalanceOf => self.balance_of(state, &args)?,
            Method::Transfer => self.transfer(state, call, &args)?,
        };
        abi::encode(&outputs, &signature.outputs).map_err(PrecompileError::OutputEncoding)
    }

    fn mint(
        &self,
        state: &mut dyn ExtStateDb,
        call: &CallContext,
        args: &[Token],
    ) -> PrecompileResult<Vec<Token>> {
        let (recipient, amount) = address_and_amount(args, Method::Mint.signature())?;
        require_positive(&amount)?;
        check_recipient(&self.keeper, &recipient)?;

        let coins = [self.caller_coin(call, amount)];
        let module = self.config.module_name.as_str();
        run_atomic(state, self.config.address, |ctx| {
            self.keeper.is_send_enabled_coins(ctx, &coins)?;
            self.keeper
                .mint_coins(ctx, module, &coins)
                .context("fail to mint coins in precompiled contract")?;
            self.keeper
                .send_coins_from_module_to_account(ctx, module, &recipient, &coins)
                .context("fail to send mint coins to account")
        })?;
        Ok(Vec::new())
    }

    /// `account` is the address being debited.
    fn burn(
        &self,
        state: &mut dyn ExtStateDb,
        call: &CallContext,
        args: &[Token],
    ) -> PrecompileResult<Vec<Token>> {
        let (account, amount) = address_and_amount(args, Method::Burn.signature())?;
        require_positive(&amount)?;
        check_recipient(&self.keeper, &account)?;

        let coins = [self.caller_coin(call, amount)];
        let module = self.config.module_name.as_str();
        run_atomic(state, self.config.address, |ctx| {
            self.keeper.is_send_enabled_coins(ctx, &coins)?;
            self.keeper
                .send_coins_from_account_to_module(ctx, &account, module, &coins)
                .context("fail to send burn coins to module")?;
            self.keeper
                .burn_coins(ctx, module, &coins)
                .context("fail to burn coins in precompiled contract")
        })?;
        Ok(Vec::new())
    }

    fn balance_of(
        &self,
        state: &mut dyn ExtStateDb,
        args: &[Token],
    ) -> PrecompileResult<Vec<Token>> {
        let (token, owner) = match args {
            [Token::Address(token), Token::Address(owner)] => (*token, *owner),
            _ => return Err(mismatch(args, Method::BalanceOf.signature())),
        };

        let denom = denom_of(&token);
        let balance: BigUint = run_atomic(state, self.config.address, |ctx| {
            Ok(self.keeper.get_balance(ctx, &owner, &denom).amount)
        })?;
        Ok(vec![Token::Uint(balance)])
    }

    fn transfer(
        &self,
        state: &mut dyn ExtStateDb,
        call: &CallContext,
        args: &[Token],
    ) -> PrecompileResult<Vec<Token>> {
        let (sender, recipient, amount) = match args {
            [Token::Address(sender), Token::Address(recipient), Token::Uint(amount)] => {
                (*sender, *recipient, amount.clone())
            }
            _ => return Err(mismatch(args, Method::Transfer.signature())),
        };
        require_positive(&amount)?;
        // only the receiving side is subject to the blocked-address policy
        check_recipient(&self.keeper, &recipient)?;

        let coins = [self.caller_coin(call, amount)];
        run_atomic(state, self.config.address, |ctx| {
            self.keeper.is_send_enabled_coins(ctx, &coins)?;
            self.keeper
                .send_coins(ctx, &sender, &recipient, &coins)
                .context("fail to send coins in precompiled contract")
        })?;
        Ok(Vec::new())
    }

    fn caller_coin(&self, call: &CallContext, amount: BigUint) -> Coin {
        Coin {
            denom: denom_of(&call.caller),
            amount,
        }
    }
}

impl<K> PrecompiledContract for BankContract<K>
where
    K: BankKeeper + Send + Sync,
{
    fn address(&self) -> Address {
        self.config.address
    }

    // Flat placeholder cost; independent of method and input size.
    fn required_gas(&self, _input: &[u8]) -> u64 {
        self.config.required_gas
    }

    fn is_stateful(&self) -> bool {
        true
    }

    fn run(&self, state: &mut dyn ExtStateDb, call: &CallContext) -> PrecompileResult<Vec<u8>> {
        self.dispatch(state, call).map_err(|err| {
            debug!(kind = ?err.kind(), error = %err, caller = %call.caller, "bank precompile call rejected");
            err
        })
    }
}

fn require_positive(amount: &BigUint) -> PrecompileResult<()> {
    if amount.is_zero() {
        return Err(PrecompileError::InvalidAmount);
    }
    Ok(())
}

fn address_and_amount(
    args: &[Token],
    signature: &MethodSignature,
) -> PrecompileResult<(Address, BigUint)> {
    match args {
        [Token::Address(address), Token::Uint(amount)] => Ok((*address, amount.clone())),
        _ => Err(mismatch(args, signature)),
    }
}

fn mismatch(args: &[Token], signature: &MethodSignature) -> PrecompileError {
    PrecompileError::MalformedArguments(AbiError::ArityMismatch {
        expected: signature.inputs.len(),
        actual: args.len(),
    })
}
