use std::process::ExitCode;

use clap::Parser;
use solana_client::rpc_client::RpcClient;

mod cluster;
mod config;
mod dispatch;
mod error;
mod funding;
#[cfg(test)]
mod mock;
mod program;
mod provision;
mod reader;
mod workflow;

use config::{Cli, Config, SolanaConfig};
use error::Result;


/// `usage: bank-client [--url <url>] [--keypair <path>] [--seed <seed>] …`
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}


/// Sets up logging to stderr.  `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}


/// Executes the program.
fn run(cli: &Cli) -> Result {
    let solana = SolanaConfig::resolve(cli.config.as_deref())?;
    let config = Config::new(cli, solana)?;
    tracing::debug!("{config:?}");

    let url = config.rpc_url.clone();
    let client = RpcClient::new_with_commitment(url, config.commitment);
    let report = workflow::run(&client, &config)?;

    if cli.json {
        println!("{}", report.to_json());
    } else {
        println!("{:?}", report.record);
    }
    Ok(())
}
