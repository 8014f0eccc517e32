//! Unreliable Domains CLI
//!
//! Command-line front end for viewing and editing the unreliable domain list.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use udl_core::Config;

use args::Args;
use commands::Command;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Completions need neither config nor logging
    if let Some(Command::Completions(comp_args)) = &args.command {
        return commands::completions::execute(comp_args);
    }

    let config = commands::config::resolve(&args)?;

    // Initialize logging
    logging::init(&args, &config.logging)?;
    debug!("Storage key '{}' via {:?} backend", config.storage.key, config.storage.backend);

    let result = run(args, &config).await;

    if let Err(ref e) = result {
        error!("Fatal error: {:#}", e);
    }

    result
}

async fn run(args: Args, config: &Config) -> Result<()> {
    match args.command {
        None | Some(Command::List) => commands::domains::list(config).await,
        Some(Command::Add(add_args)) => commands::domains::add(add_args, config).await,
        Some(Command::Remove(remove_args)) => commands::domains::remove(remove_args, config).await,
        Some(Command::Reset) => commands::domains::reset(config).await,
        Some(Command::Config(config_args)) => commands::config::execute(config_args, config),
        Some(Command::Completions(comp_args)) => commands::completions::execute(&comp_args),
    }
}
