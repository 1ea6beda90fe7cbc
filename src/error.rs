//! Error types for conf-mover.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Move error: {0}")]
    Move(#[from] MoveError),

    #[error("Reload error: {0}")]
    Reload(#[from] ReloadError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading and parsing errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read env file '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid value for {key} on line {line}: {message}")]
    InvalidValue {
        key: String,
        line: usize,
        message: String,
    },

    #[error("Config validation failed with {error_count} error(s)")]
    ValidationFailed { error_count: usize },
}

/// Errors raised while moving a configuration file.
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("Invalid filename: '{0}'")]
    InvalidFilename(String),

    #[error("source file does not exist: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to create directory '{}': {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move '{}' -> '{}': {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised by the test-then-reload cycle.
#[derive(Error, Debug)]
pub enum ReloadError {
    #[error("Failed to run '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    #[error("Nginx config test failed with exit code {code}:\n{output}")]
    ConfigTestFailed { code: i32, output: String },

    #[error("Failed to reload nginx (exit code {code}):\n{output}")]
    ReloadFailed { code: i32, output: String },
}

/// Fingerprint cache persistence errors.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read cache file '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{}': {message}", path.display())]
    ParseFailed { path: PathBuf, message: String },

    #[error("Failed to write cache file '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize cache: {0}")]
    SerializationFailed(String),
}
