//! Environment file loading and parsing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::model::{AppConfig, ListFormat};
use crate::error::ConfigError;

const KNOWN_KEYS: &[&str] = &[
    "NGINX_DIR",
    "BACKUP_DIR",
    "CACHE_FILE",
    "LIST_FORMAT",
    "TEST_COMMAND",
    "RELOAD_COMMAND",
];

/// Loads the configuration, falling back to defaults when the env file is absent.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Env file not found, using defaults");
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    parse(&content)
}

/// Applies `KEY=value` lines on top of the default configuration.
pub fn parse(content: &str) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = unquote(value.trim());

        match key {
            "NGINX_DIR" => config.active_dir = PathBuf::from(value),
            "BACKUP_DIR" => config.backup_dir = PathBuf::from(value),
            "CACHE_FILE" => {
                config.cache_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "LIST_FORMAT" => {
                config.list_format = value.parse::<ListFormat>().map_err(|message| ConfigError::InvalidValue {
                    key: key.to_string(),
                    line: line_no,
                    message,
                })?
            }
            "TEST_COMMAND" => config.test_command = parse_command(key, value, line_no)?,
            "RELOAD_COMMAND" => config.reload_command = parse_command(key, value, line_no)?,
            _ => {
                warn!(
                    key,
                    line = line_no,
                    suggestion = find_similar_key(key),
                    "Ignoring unrecognized env file key"
                );
            }
        }
    }

    Ok(config)
}

/// Splits a command line on whitespace. No shell quoting is honoured.
fn parse_command(key: &str, value: &str, line: usize) -> Result<Vec<String>, ConfigError> {
    let argv: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    if argv.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            line,
            message: "command must not be empty".to_string(),
        });
    }
    Ok(argv)
}

/// Strips one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Finds the most similar known key using Levenshtein distance.
fn find_similar_key(input: &str) -> &'static str {
    KNOWN_KEYS
        .iter()
        .min_by_key(|k| strsim::levenshtein(input, k))
        .copied()
        .unwrap_or("NGINX_DIR")
}
