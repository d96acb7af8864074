//! Configuration layer for netstate.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The attach hook command uses "replace" semantics: any `--attach-command`
//! argument on the CLI replaces the whole `[attach] command` array.
//!
//! # Networks
//!
//! Network definitions come only from the config file (`[[networks]]`).
//! Every definition is checked at load: the name goes through the interface
//! name validator and every config key through
//! [`validate_network_config`](crate::validate::validate_network_config).
//! Duplicate names are rejected.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command, ValidatorArg};
pub use error::ConfigError;
pub use toml::{AttachSection, DaemonSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
