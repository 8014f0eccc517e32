//! Config command - configuration management

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use udl_core::config::{Config, StorageBackend, APP_NAME};

use crate::args::Args as CliArgs;

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Generate a configuration file with default settings
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Config file to validate
        file: PathBuf,
    },

    /// Show config and storage file locations
    Paths,
}

/// Execute config command
pub fn execute(args: ConfigArgs, config: &Config) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config),
        ConfigAction::Generate { output, force } => generate_config(&output, force),
        ConfigAction::Validate { file } => validate_config(&file),
        ConfigAction::Paths => show_paths(config),
    }
}

/// Build the effective configuration for this invocation
///
/// An explicit `--config` must exist; otherwise the search paths are tried
/// and defaults apply when none is found. `--storage` and `--key` win over
/// the file.
pub fn resolve(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(path) = &args.config {
        Config::load(path).with_context(|| format!("Failed to load config from {:?}", path))?
    } else if let Some(path) = find_config_file() {
        debug!("Using config file {:?}", path);
        Config::load(&path).with_context(|| format!("Failed to load config from {:?}", path))?
    } else {
        Config::default()
    };

    if let Some(storage) = &args.storage {
        config.storage.path = Some(storage.clone());
    }
    if let Some(key) = &args.key {
        config.storage.key = key.clone();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn show_config(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;

    println!("{}", toml_str);
    Ok(())
}

fn generate_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
    }

    let toml_str = Config::default()
        .to_toml()
        .context("Failed to serialize config")?;

    let content = format!(
        "# Unreliable Domains configuration\n\
         # storage.path defaults to {}\n\n\
         {}",
        udl_core::config::default_storage_path().display(),
        toml_str
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    info!("Generated config file: {:?}", output);
    println!("Configuration file generated: {}", output.display());

    Ok(())
}

fn validate_config(file: &Path) -> Result<()> {
    let config = Config::load(file)
        .with_context(|| format!("Failed to load config from {:?}", file))?;

    config.validate().context("Configuration validation failed")?;

    println!("✓ Configuration is valid");
    println!("  Backend: {:?}", config.storage.backend);
    println!("  Storage: {}", config.storage.resolved_path().display());
    println!("  Key: {}", config.storage.key);
    println!("  Quota per item: {} bytes", config.storage.quota_bytes_per_item);

    Ok(())
}

fn show_paths(config: &Config) -> Result<()> {
    println!("Configuration file search paths:");
    println!();
    for (i, path) in search_paths().iter().enumerate() {
        println!("  {}. {}", i + 1, path.display());
    }

    println!();
    println!("Storage area:");
    println!();
    match config.storage.backend {
        StorageBackend::File => println!("  {}", config.storage.resolved_path().display()),
        StorageBackend::Memory => println!("  (memory, not persisted)"),
    }

    Ok(())
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("config.toml"),
        PathBuf::from(format!("{APP_NAME}.toml")),
    ];

    if let Some(config_dir) = directories::ProjectDirs::from("", "", APP_NAME) {
        paths.push(config_dir.config_dir().join("config.toml"));
    }

    paths
}

fn find_config_file() -> Option<PathBuf> {
    search_paths().into_iter().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_search_paths_order() {
        let paths = search_paths();
        assert_eq!(paths[0], PathBuf::from("config.toml"));
        assert_eq!(paths[1], PathBuf::from("unreliable-domains.toml"));
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("cfg.toml");
        std::fs::write(&config_path, "[storage]\nkey = \"fromFile\"\n").unwrap();
        let config_arg = config_path.to_str().unwrap();

        let args = CliArgs::parse_from(["unreliable-domains", "-c", config_arg]);
        let config = resolve(&args).unwrap();
        assert_eq!(config.storage.key, "fromFile");

        let args = CliArgs::parse_from([
            "unreliable-domains",
            "-c",
            config_arg,
            "--key",
            "fromFlag",
            "--storage",
            "area.json",
        ]);
        let config = resolve(&args).unwrap();
        assert_eq!(config.storage.key, "fromFlag");
        assert_eq!(config.storage.path, Some(PathBuf::from("area.json")));
    }

    #[test]
    fn test_resolve_missing_explicit_config() {
        let args = CliArgs::parse_from(["unreliable-domains", "-c", "/nope/missing.toml"]);
        assert!(resolve(&args).is_err());
    }

    #[test]
    fn test_generate_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("config.toml");

        generate_config(&output, false).unwrap();
        let generated = Config::load(&output).unwrap();
        assert!(generated.validate().is_ok());

        assert!(generate_config(&output, false).is_err());
        assert!(generate_config(&output, true).is_ok());
    }
}
