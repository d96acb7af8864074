//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::collections::BTreeSet;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{NetworkDefinition, StaticCatalog};
use crate::validate::{validate_name, validate_network_config};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Root of the per-interface attribute tree
    pub sysfs_root: PathBuf,

    /// Directory for per-network state
    pub state_dir: PathBuf,

    /// Path to the cluster heartbeat JSON file
    pub heartbeat_file: PathBuf,

    /// This member's cluster address (`ip` or `ip:port`), if known
    pub local_address: Option<String>,

    /// Reconciliation interval
    pub reconcile_interval: Duration,

    /// Attach hook command, empty when not configured
    pub attach_command: Vec<String>,

    /// Configured networks, in file order
    pub networks: Vec<NetworkDefinition>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attach = self
            .attach_command
            .first()
            .map_or("none", String::as_str);

        write!(
            f,
            "Config {{ sysfs_root: {}, state_dir: {}, heartbeat_file: {}, local_address: {}, \
             reconcile_interval: {}s, attach: {}, networks: {} }}",
            self.sysfs_root.display(),
            self.state_dir.display(),
            self.heartbeat_file.display(),
            self.local_address.as_deref().unwrap_or("none"),
            self.reconcile_interval.as_secs(),
            attach,
            self.networks.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reconcile interval is zero
    /// - The local address is neither an IP nor `ip:port`
    /// - A network name or config value fails validation
    /// - Two networks share a name
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let daemon = toml.map(|t| &t.daemon);

        let sysfs_root = cli
            .sysfs_root
            .clone()
            .or_else(|| daemon.and_then(|d| d.sysfs_root.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::SYSFS_ROOT));

        let state_dir = cli
            .state_dir
            .clone()
            .or_else(|| daemon.and_then(|d| d.state_dir.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::STATE_DIR));

        let heartbeat_file = cli
            .heartbeat_file
            .clone()
            .or_else(|| daemon.and_then(|d| d.heartbeat_file.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::HEARTBEAT_FILE));

        let local_address = Self::resolve_local_address(cli, toml)?;
        let reconcile_interval = Self::resolve_reconcile_interval(cli, toml)?;

        // CLI replaces TOML entirely
        let attach_command = if cli.attach_command.is_empty() {
            toml.map(|t| t.attach.command.clone()).unwrap_or_default()
        } else {
            cli.attach_command.clone()
        };

        let networks = toml.map(|t| t.networks.clone()).unwrap_or_default();
        validate_networks(&networks)?;

        Ok(Self {
            sysfs_root,
            state_dir,
            heartbeat_file,
            local_address,
            reconcile_interval,
            attach_command,
            networks,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the in-memory catalog over the configured networks.
    #[must_use]
    pub fn catalog(&self) -> StaticCatalog {
        StaticCatalog::new(self.networks.clone())
    }

    fn resolve_local_address(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let Some(value) = cli
            .local_address
            .clone()
            .or_else(|| toml.and_then(|t| t.daemon.local_address.clone()))
        else {
            return Ok(None);
        };

        if value.parse::<IpAddr>().is_err() && value.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidLocalAddress { value });
        }

        Ok(Some(value))
    }

    fn resolve_reconcile_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .reconcile_interval
            .or_else(|| toml.and_then(|t| t.daemon.reconcile_interval))
            .unwrap_or(defaults::RECONCILE_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "reconcile_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Checks names, uniqueness, and every config entry of each network.
fn validate_networks(networks: &[NetworkDefinition]) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();

    for network in networks {
        validate_name(&network.name).map_err(|source| ConfigError::InvalidNetworkName {
            network: network.name.clone(),
            source,
        })?;

        if !seen.insert(network.name.as_str()) {
            return Err(ConfigError::DuplicateNetwork {
                network: network.name.clone(),
            });
        }

        for (key, value) in &network.config {
            validate_network_config(key, value).map_err(|source| {
                ConfigError::InvalidNetworkConfig {
                    network: network.name.clone(),
                    key: key.clone(),
                    source,
                }
            })?;
        }
    }

    Ok(())
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
