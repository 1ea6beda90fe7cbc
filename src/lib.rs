//! conf-mover - enable, disable, list and reload nginx virtual-host files.
//!
//! Sites are disabled by moving their `.conf` file out of the directory nginx
//! loads into a backup directory, and enabled by moving it back. Changes are
//! applied with a test-then-reload cycle that never reloads a broken config.

pub mod cli;
pub mod config;
pub mod error;
pub mod lister;
pub mod mover;
pub mod reloader;
pub mod validation;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, warn};

use crate::cli::{Cli, Commands, ListArgs, MoveAction};
use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use crate::lister::Lister;

/// Runs conf-mover with the provided CLI arguments.
pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level())?;

    let config = config::loader::load_from_path(&cli.env_file)
        .with_context(|| format!("Failed to load {}", cli.env_file.display()))?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Move { action, filename } => handle_move(&config, action, &filename)?,
        Commands::Reload => handle_reload(&config).await?,
        Commands::List(args) => handle_list(&config, &args)?,
        Commands::ConfigValidate => validate_config(&config)?,
        Commands::ConfigShow => show_config(&config, &cli.env_file)?,
    }

    Ok(())
}

/// Initializes the tracing subscriber. Events go to stderr so stdout carries only command output.
fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Moves one configuration file and prints the confirmation.
fn handle_move(config: &AppConfig, action: MoveAction, filename: &str) -> Result<(), AppError> {
    let outcome = mover::move_config(config, action, filename)?;
    println!("{}", outcome);
    Ok(())
}

/// Runs the configuration test, then the reload.
async fn handle_reload(config: &AppConfig) -> Result<(), AppError> {
    reloader::test_and_reload(config).await?;
    Ok(())
}

/// Scans both directories and prints the JSON listing.
fn handle_list(config: &AppConfig, args: &ListArgs) -> Result<(), AppError> {
    let listing = Lister::new(config, !args.no_cache).scan()?;
    let format = args.format.unwrap_or(config.list_format);
    let json = lister::render(&listing.records, format)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

/// Checks the configured paths and prints a per-setting report.
fn validate_config(config: &AppConfig) -> Result<(), AppError> {
    let findings = validation::validate_config(config);

    for finding in findings.iter().filter(|f| !f.is_fatal()) {
        warn!(
            key = finding.setting.key(),
            problem = %finding.describe(),
            "Config validation warning"
        );
    }

    println!("{}", validation::report::format_report(config, &findings));

    let error_count = validation::fatal_count(&findings);
    if error_count > 0 {
        error!(error_count, "Config validation failed");
        return Err(ConfigError::ValidationFailed { error_count }.into());
    }

    Ok(())
}

/// Displays the resolved configuration.
fn show_config(config: &AppConfig, env_file: &Path) -> Result<(), AppError> {
    let yaml = serde_yaml::to_string(config)?;
    println!("# resolved from {}", env_file.display());
    println!("{}", yaml);
    Ok(())
}
