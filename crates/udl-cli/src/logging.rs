//! Logging initialization

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use udl_core::config::LoggingConfig;

use crate::args::{Args, LogFormat};

/// Initialize logging from CLI arguments and the `[logging]` section
///
/// Logs go to stderr; stdout carries the list output.
pub fn init(args: &Args, config: &LoggingConfig) -> Result<()> {
    let level = level_for(args, config)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let format = if config.json_format && args.log_format == LogFormat::Text {
        LogFormat::Json
    } else {
        args.log_format
    };
    let log_file = args.log_file.as_ref().or(config.file.as_ref());

    match format {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(args.verbose >= 2)
                    .with_thread_ids(args.verbose >= 3)
                    .with_file(args.verbose >= 3)
                    .with_line_number(args.verbose >= 3),
            );

            if let Some(log_file) = log_file {
                let file = std::fs::File::create(log_file)
                    .with_context(|| format!("Failed to create log file: {}", log_file))?;
                let file_layer = fmt::layer().with_ansi(false).with_writer(file);
                subscriber.with(file_layer).init();
            } else {
                subscriber.init();
            }
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr));

            if let Some(log_file) = log_file {
                let file = std::fs::File::create(log_file)
                    .with_context(|| format!("Failed to create log file: {}", log_file))?;
                let file_layer = fmt::layer().json().with_writer(file);
                subscriber.with(file_layer).init();
            } else {
                subscriber.init();
            }
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr));

            if let Some(log_file) = log_file {
                let file = std::fs::File::create(log_file)
                    .with_context(|| format!("Failed to create log file: {}", log_file))?;
                let file_layer = fmt::layer().compact().with_ansi(false).with_writer(file);
                subscriber.with(file_layer).init();
            } else {
                subscriber.init();
            }
        }
    }

    Ok(())
}

fn level_for(args: &Args, config: &LoggingConfig) -> Result<LevelFilter> {
    if args.quiet {
        return Ok(LevelFilter::ERROR);
    }

    match args.verbose {
        0 => config
            .level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid log level: {}", config.level)),
        1 => Ok(LevelFilter::DEBUG),
        _ => Ok(LevelFilter::TRACE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_level_selection() {
        let config = LoggingConfig::default();

        let args = Args::parse_from(["unreliable-domains"]);
        assert_eq!(level_for(&args, &config).unwrap(), LevelFilter::WARN);

        let args = Args::parse_from(["unreliable-domains", "-vv"]);
        assert_eq!(level_for(&args, &config).unwrap(), LevelFilter::TRACE);

        let args = Args::parse_from(["unreliable-domains", "-q", "-v"]);
        assert_eq!(level_for(&args, &config).unwrap(), LevelFilter::ERROR);
    }

    #[test]
    fn test_bad_level() {
        let config = LoggingConfig {
            level: "chatty".to_string(),
            ..LoggingConfig::default()
        };
        let args = Args::parse_from(["unreliable-domains"]);
        assert!(level_for(&args, &config).is_err());
    }
}
