//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A network's name is not a usable interface name.
    #[error("Invalid network name '{network}': {source}")]
    InvalidNetworkName {
        /// The rejected name
        network: String,
        /// Validator failure
        #[source]
        source: ValidationError,
    },

    /// A network config value failed its key's validator.
    #[error("Invalid value for '{key}' on network '{network}': {source}")]
    InvalidNetworkConfig {
        /// Network the key belongs to
        network: String,
        /// Config key
        key: String,
        /// Validator failure
        #[source]
        source: ValidationError,
    },

    /// Two networks share a name.
    #[error("Network '{network}' is defined more than once")]
    DuplicateNetwork {
        /// The repeated name
        network: String,
    },

    /// The local address is neither an IP nor `ip:port`.
    #[error("Invalid local address '{value}': expected an IP address or ip:port")]
    InvalidLocalAddress {
        /// The rejected value
        value: String,
    },
}
