//! Domain list commands
//!
//! Show the numbered list, add a domain, remove one by number, or reset to
//! the defaults. Each mutation is persisted before the list is shown again.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use udl_core::config::{Config, StorageBackend};
use udl_core::storage::KeyValueStore;
use udl_core::store::{AddOutcome, DomainListStore};

/// Store bound to whichever backend the configuration selects
pub type Session = DomainListStore<Box<dyn KeyValueStore>>;

/// Add command arguments
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Domain to add (e.g. example.com)
    #[arg(allow_hyphen_values = true)]
    pub domain: String,
}

/// Remove command arguments
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// List number of the domain (shown before the colon)
    #[arg(allow_hyphen_values = true)]
    pub index: String,
}

/// Open the list for this invocation
pub async fn open(config: &Config) -> Session {
    DomainListStore::open(config.storage.build_backend(), config.storage.key.clone()).await
}

/// Show the list
pub async fn list(config: &Config) -> Result<()> {
    let store = open(config).await;
    render(&store, config);
    Ok(())
}

/// Add a domain
pub async fn add(args: AddArgs, config: &Config) -> Result<()> {
    let mut store = open(config).await;

    match store.add(&args.domain).await {
        Ok(AddOutcome::Added(domain)) => {
            render(&store, config);
            println!(
                "{} Added \"{}\" to the list.",
                "✓".green(),
                domain.as_str().cyan()
            );
        }
        Ok(AddOutcome::AlreadyPresent(domain)) => {
            println!(
                "{} \"{}\" is already in the list.",
                "!".yellow(),
                domain.as_str().cyan()
            );
        }
        Ok(AddOutcome::Blank) => {}
        Err(e) => {
            println!("{} Failed to add domain. Please try again.", "✗".red());
            return Err(e).context("Failed to add domain");
        }
    }

    Ok(())
}

/// Remove a domain by list number
pub async fn remove(args: RemoveArgs, config: &Config) -> Result<()> {
    let mut store = open(config).await;

    match store.remove_at_str(&args.index).await {
        Ok(domain) => {
            render(&store, config);
            println!(
                "{} Removed \"{}\" from the list.",
                "✓".green(),
                domain.as_str().cyan()
            );
        }
        Err(e) if e.is_validation() => {
            println!(
                "{} Invalid index. Please enter a number between 1 and {}.",
                "✗".red(),
                store.len()
            );
        }
        Err(e) => {
            println!("{} Failed to remove domain. Please try again.", "✗".red());
            return Err(e).context("Failed to remove domain");
        }
    }

    Ok(())
}

/// Replace the list with the defaults
pub async fn reset(config: &Config) -> Result<()> {
    let mut store = open(config).await;

    if let Err(e) = store.reset().await {
        println!("{} Failed to reset domain list. Please try again.", "✗".red());
        return Err(e).context("Failed to reset domain list");
    }

    render(&store, config);
    println!("{} Domain list has been reset to default.", "✓".green());
    Ok(())
}

/// Print the numbered list
fn render(store: &Session, config: &Config) {
    let location = match config.storage.backend {
        StorageBackend::File => config.storage.resolved_path().display().to_string(),
        StorageBackend::Memory => "memory".to_string(),
    };

    println!("{}", "═".repeat(50).bright_blue());
    println!("{}", " Unreliable Domains".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("Storage: {} [{}]", location.cyan(), store.key());
    println!("Total domains: {}", store.len().to_string().green());
    println!("{}", "─".repeat(50).bright_black());

    if store.is_empty() {
        println!("{}", "  (empty)".dimmed());
    } else {
        for line in numbered_lines(store) {
            println!("{}", line);
        }
    }

    println!("{}", "═".repeat(50).bright_blue());
}

fn numbered_lines(store: &Session) -> Vec<String> {
    let width = store.len().to_string().len();
    store
        .numbered()
        .map(|(n, domain)| format!("  {:>width$}: {}", n, domain))
        .collect()
}
