use clap::{Args, Parser, Subcommand};
use evm_bank_primitives::Address;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "evm-bank",
    version,
    about = "Inspect and exercise the EVM bank precompile"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints the method table with canonical signatures and selectors.
    Selectors,

    /// Prints the denomination owned by a contract address.
    Denom {
        /// 20-byte hex address, with or without `0x`.
        address: Address,
    },

    /// Runs one call against a ledger seeded from a genesis file.
    Call(CallArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CallArgs {
    /// Genesis TOML with initial balances and bank policy.
    #[arg(long, value_name = "PATH")]
    pub genesis: PathBuf,

    /// Precompile TOML; defaults apply when omitted.
    #[arg(long, value_name = "PATH", env = "EVM_BANK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address of the calling contract; its denomination is the one minted,
    /// burned or transferred.
    #[arg(long, value_name = "ADDRESS")]
    pub caller: Address,

    /// Target address. Defaults to the configured precompile address.
    #[arg(long, value_name = "ADDRESS")]
    pub to: Option<Address>,

    /// Call payload (selector and arguments) as hex.
    #[arg(long, value_name = "HEX")]
    pub input: String,

    /// Runs the call in a static frame.
    #[arg(long)]
    pub read_only: bool,

    /// Prints the result as JSON.
    #[arg(long)]
    pub json: bool,
}
