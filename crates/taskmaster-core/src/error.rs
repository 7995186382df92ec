//! Core error types for taskmaster-core.
//!
//! Most board operations degrade to a no-op instead of failing, so the
//! hierarchy is small: storage writes, configuration, and rule tables.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskmaster-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid priority rule table
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a stored value
    #[error("Failed to read '{key}' from {path}: {source}")]
    ReadFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a stored value
    #[error("Failed to write '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be mapped to a file name
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Priority rule table errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// Keyword is empty after normalization
    #[error("Empty keyword in {tier} rule")]
    EmptyKeyword { tier: String },

    /// Weights must be positive
    #[error("Keyword '{word}' has zero weight")]
    ZeroWeight { word: String },

    /// Same tier configured twice
    #[error("Duplicate rule for tier {0}")]
    DuplicateTier(String),

    /// Keyword could not be compiled into a matcher
    #[error("Keyword '{word}' cannot be compiled: {message}")]
    InvalidPattern { word: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
