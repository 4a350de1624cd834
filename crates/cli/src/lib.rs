//! Command-line front end for the EVM bank precompile.

pub mod args;
pub mod commands;

pub use args::{CallArgs, Cli, Command};
