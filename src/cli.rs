//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::model::ListFormat;

/// Enable, disable, list and reload nginx virtual-host configuration files.
#[derive(Parser, Debug)]
#[command(name = "conf-mover", version, about, long_about = None)]
pub struct Cli {
    /// Path to the key-value environment file.
    #[arg(long, default_value = ".env", env = "CONF_MOVER_ENV", global = true)]
    pub env_file: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level based on verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move a configuration file between the active and backup directories.
    Move {
        /// Direction of the move.
        action: MoveAction,

        /// Configuration file name (".conf" is appended when missing).
        filename: String,
    },

    /// Test the nginx configuration and reload the service if it passes.
    Reload,

    /// List active and disabled configuration files as JSON.
    List(ListArgs),

    /// Validate the resolved configuration without touching any files.
    #[command(name = "config-validate")]
    ConfigValidate,

    /// Display the resolved configuration.
    #[command(name = "config-show")]
    ConfigShow,
}

/// Direction of a `move`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveAction {
    /// Disable a site: active directory -> backup directory.
    #[value(alias = "disable")]
    Backup,
    /// Enable a site: backup directory -> active directory.
    #[value(alias = "enable")]
    Restore,
}

/// Arguments for the list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output shape; overrides LIST_FORMAT from the environment file.
    #[arg(long, value_enum)]
    pub format: Option<ListFormat>,

    /// Skip the fingerprint cache for this invocation.
    #[arg(long, default_value = "false")]
    pub no_cache: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_with_alias() {
        let cli = Cli::try_parse_from(["conf-mover", "move", "disable", "site.conf"]).unwrap();
        match cli.command {
            Commands::Move { action, filename } => {
                assert_eq!(action, MoveAction::Backup);
                assert_eq!(filename, "site.conf");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_action_and_wrong_arity() {
        assert!(Cli::try_parse_from(["conf-mover", "move", "sideways", "a.conf"]).is_err());
        assert!(Cli::try_parse_from(["conf-mover", "move", "backup"]).is_err());
        assert!(Cli::try_parse_from(["conf-mover", "reload", "extra"]).is_err());
        assert!(Cli::try_parse_from(["conf-mover", "frobnicate"]).is_err());
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cli = Cli::try_parse_from(["conf-mover", "-vv", "list"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["conf-mover", "list", "--format", "source"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
        match cli.command {
            Commands::List(args) => assert_eq!(args.format, Some(ListFormat::Source)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
