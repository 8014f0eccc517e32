//! CLI commands

pub mod completions;
pub mod config;
pub mod domains;

use clap::Subcommand;

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the numbered domain list (default)
    List,

    /// Add a domain to the list
    Add(domains::AddArgs),

    /// Remove a domain by its list number
    Remove(domains::RemoveArgs),

    /// Replace the list with the built-in defaults
    Reset,

    /// Configuration management
    Config(config::ConfigArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
