use anyhow::Result;
use clap::Parser;
use evm_bank_cli::{commands, Cli, Command};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Selectors => {
            for line in commands::selectors() {
                println!("{line}");
            }
        }
        Command::Denom { address } => println!("{}", commands::denom(&address)),
        Command::Call(args) => {
            let report = commands::call(&args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                print!("{}", report.render_text());
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,evm_bank=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
