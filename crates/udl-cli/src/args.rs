//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::commands::Command;

/// Unreliable Domains - keep a list of news domains you do not trust
///
/// Shows, extends, trims and resets a persisted list of unreliable domains.
/// Without a subcommand the current list is shown.
#[derive(Parser, Debug)]
#[command(name = "unreliable-domains")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true, env = "UDL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Storage area file (overrides storage.path)
    #[arg(short = 's', long, value_name = "FILE", global = true, env = "UDL_STORAGE")]
    pub storage: Option<PathBuf>,

    /// Storage key holding the list (overrides storage.key)
    #[arg(long, value_name = "KEY", global = true)]
    pub key: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose() {
        let args = Args::parse_from(["unreliable-domains", "-v"]);
        assert_eq!(args.verbose, 1);

        let args = Args::parse_from(["unreliable-domains", "-vvv"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn test_no_subcommand_means_list() {
        let args = Args::parse_from(["unreliable-domains"]);
        assert!(args.command.is_none());
        assert_eq!(args.log_format, LogFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "unreliable-domains",
            "add",
            "example.com",
            "--storage",
            "/tmp/area.json",
            "--key",
            "myList",
        ]);
        assert_eq!(args.storage, Some(PathBuf::from("/tmp/area.json")));
        assert_eq!(args.key.as_deref(), Some("myList"));
        assert!(matches!(args.command, Some(Command::Add(_))));
    }

    #[test]
    fn test_remove_accepts_negative_text() {
        let args = Args::parse_from(["unreliable-domains", "remove", "-1"]);
        match args.command {
            Some(Command::Remove(remove)) => assert_eq!(remove.index, "-1"),
            other => panic!("Wrong command: {other:?}"),
        }
    }
}
