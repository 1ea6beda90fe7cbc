//! Configuration data structures.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resolved configuration, built once at startup and read by every handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory nginx loads enabled virtual hosts from.
    pub active_dir: PathBuf,

    /// Holding directory for disabled virtual hosts.
    pub backup_dir: PathBuf,

    /// Fingerprint cache location. Listing runs uncached when unset.
    #[serde(default)]
    pub cache_file: Option<PathBuf>,

    /// Shape of the `list` output records.
    #[serde(default)]
    pub list_format: ListFormat,

    /// Configuration test command, as an argv vector.
    #[serde(default = "default_test_command")]
    pub test_command: Vec<String>,

    /// Service reload command, as an argv vector.
    #[serde(default = "default_reload_command")]
    pub reload_command: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            active_dir: default_active_dir(),
            backup_dir: default_backup_dir(),
            cache_file: None,
            list_format: ListFormat::default(),
            test_command: default_test_command(),
            reload_command: default_reload_command(),
        }
    }
}

impl AppConfig {
    /// Returns the directory a configuration file is taken from and the one it lands in.
    pub fn directories(&self, disable: bool) -> (&PathBuf, &PathBuf) {
        if disable {
            (&self.active_dir, &self.backup_dir)
        } else {
            (&self.backup_dir, &self.active_dir)
        }
    }
}

/// Output shape of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// `filename`, `server_name`, `current_dir`.
    #[default]
    Directory,
    /// `filename`, `server_name`, `source`, `disabled`.
    Source,
}

impl std::str::FromStr for ListFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "directory" | "dir" => Ok(Self::Directory),
            "source" => Ok(Self::Source),
            other => Err(format!(
                "unknown list format '{}', expected 'directory' or 'source'",
                other
            )),
        }
    }
}

fn default_active_dir() -> PathBuf {
    PathBuf::from("/etc/nginx/conf.d")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("/home/manager-bkp")
}

fn default_test_command() -> Vec<String> {
    vec!["nginx".to_string(), "-t".to_string()]
}

fn default_reload_command() -> Vec<String> {
    vec![
        "systemctl".to_string(),
        "reload".to_string(),
        "nginx".to_string(),
    ]
}
