//! Subcommand implementations. Each returns its report so `main` only prints.

use crate::args::CallArgs;
use anyhow::{anyhow, bail, Context, Result};
use evm_bank_config::{GenesisConfig, PrecompileConfig};
use evm_bank_ledger::MemoryBankKeeper;
use evm_bank_precompile::{
    denom_of, registry, BankContract, CallContext, JournaledState, PrecompileSet,
};
use evm_bank_primitives::{Address, Coin};
use serde_json::{json, Value};
use tracing::info;

/// One line per method: name, canonical signature, selector.
pub fn selectors() -> Vec<String> {
    registry()
        .iter()
        .map(|(_, signature)| {
            format!(
                "{:<10} {:<36} {}",
                signature.name,
                signature.canonical(),
                signature.selector_hex()
            )
        })
        .collect()
}

pub fn denom(address: &Address) -> String {
    denom_of(address)
}

/// Outcome of a successful `call`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReport {
    pub to: Address,
    pub gas: u64,
    pub output: Vec<u8>,
    pub committed: usize,
    pub balances: Vec<(Address, Coin)>,
}

impl CallReport {
    pub fn render_text(&self) -> String {
        let mut out = format!(
            "to:        {}\ngas:       {}\noutput:    0x{}\ncommitted: {}\n",
            self.to,
            self.gas,
            hex::encode(&self.output),
            self.committed
        );
        if self.balances.is_empty() {
            out.push_str("balances:  (none)\n");
        } else {
            out.push_str("balances:\n");
            for (address, coin) in &self.balances {
                out.push_str(&format!("  {} {}\n", address, coin));
            }
        }
        out
    }

    pub fn to_json(&self) -> Value {
        let balances: Vec<Value> = self
            .balances
            .iter()
            .map(|(address, coin)| {
                json!({
                    "address": address.to_string(),
                    "denom": coin.denom,
                    "amount": coin.amount.to_string(),
                })
            })
            .collect();
        json!({
            "to": self.to.to_string(),
            "gas": self.gas,
            "output": format!("0x{}", hex::encode(&self.output)),
            "committed": self.committed,
            "balances": balances,
        })
    }
}

/// Decodes a hex payload, accepting an optional `0x` prefix.
pub fn parse_input(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).with_context(|| format!("invalid hex input '{}'", input))
}

fn load_config(args: &CallArgs) -> Result<PrecompileConfig> {
    match &args.config {
        Some(path) => PrecompileConfig::load(path)
            .with_context(|| format!("loading precompile config {}", path.display())),
        None => Ok(PrecompileConfig::default()),
    }
}

/// Seeds a ledger from genesis, runs the call and commits it.
pub fn call(args: &CallArgs) -> Result<CallReport> {
    let config = load_config(args)?;
    let genesis = GenesisConfig::load(&args.genesis)
        .with_context(|| format!("loading genesis {}", args.genesis.display()))?;
    let input = parse_input(&args.input)?;

    let (keeper, store) =
        MemoryBankKeeper::from_genesis(&genesis).context("seeding bank ledger from genesis")?;
    let bank_address = config.address;
    let mut precompiles = PrecompileSet::new();
    precompiles.register(BankContract::with_config(keeper, config));

    let to = args.to.unwrap_or(bank_address);
    let gas = precompiles
        .required_gas(&to, &input)
        .ok_or_else(|| anyhow!("no precompile registered at {}", to))?;

    let mut state = JournaledState::new(store);
    let snapshot = state.snapshot();
    let call = CallContext::new(args.caller, input, args.read_only);
    let output = match precompiles.call(&to, &mut state, &call) {
        Some(Ok(output)) => output,
        Some(Err(err)) => {
            state.revert_to_snapshot(snapshot);
            let kind = err.kind();
            return Err(anyhow::Error::new(err).context(format!("call reverted ({:?})", kind)));
        }
        None => bail!("no precompile registered at {}", to),
    };

    let committed = state.journal_len();
    let store = state.into_store();
    info!(to = %to, caller = %args.caller, gas, committed, "call committed");
    Ok(CallReport {
        to,
        gas,
        output,
        committed,
        balances: store.balances(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_listing() {
        let lines = selectors();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("mint"));
        assert!(lines[0].ends_with("0x40c10f19"));
        assert!(lines.iter().any(|l| l.contains("balanceOf(address,address)")));
    }

    #[test]
    fn test_denom() {
        assert_eq!(
            denom(&Address::from_low_byte(0xc0)),
            "evm/0x00000000000000000000000000000000000000c0"
        );
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("0xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(parse_input(" DEADBEEF ").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(parse_input("0xzz").is_err());
    }
}
