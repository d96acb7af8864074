//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::NetworkDefinition;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Daemon configuration section
    #[serde(default)]
    pub daemon: DaemonSection,

    /// Attach hook configuration section
    #[serde(default)]
    pub attach: AttachSection,

    /// Configured networks
    #[serde(default)]
    pub networks: Vec<NetworkDefinition>,
}

/// Daemon configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonSection {
    /// Root of the per-interface attribute tree
    pub sysfs_root: Option<PathBuf>,

    /// Directory for per-network state
    pub state_dir: Option<PathBuf>,

    /// Path to the cluster heartbeat JSON file
    pub heartbeat_file: Option<PathBuf>,

    /// This member's address
    pub local_address: Option<String>,

    /// Reconciliation interval in seconds
    pub reconcile_interval: Option<u64>,
}

/// Attach hook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachSection {
    /// Hook program followed by fixed arguments
    #[serde(default)]
    pub command: Vec<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# netstate configuration file

[daemon]
# Root of the per-interface attribute tree (default: /sys/class/net)
# sysfs_root = "/sys/class/net"

# Directory for per-network state (default: /var/lib/netstate)
# DNS helper server lists are written to
# <state_dir>/networks/<name>/forkdns.servers/servers.conf
# state_dir = "/var/lib/netstate"

# Cluster heartbeat snapshot written by the clustering layer
# (default: /var/lib/netstate/heartbeat.json)
# heartbeat_file = "/var/lib/netstate/heartbeat.json"

# This member's cluster address (ip or ip:port), left out of every server list
# local_address = "10.0.0.1"

# Reconciliation interval in seconds (default: 30)
reconcile_interval = 30

[attach]
# Hook invoked as: <command...> <network> <device>
# Note: --attach-command on the CLI REPLACES this entirely (not merged)
# command = ["/usr/libexec/netstate/attach-hook"]

# Networks
# [[networks]]
# name = "lxdbr0"
# type = "bridge"
# status = "created"
#
# [networks.config]
# "ipv4.address" = "10.0.3.1/24"
# "bridge.external_interfaces" = "eth1, eth2"
#
# [[networks]]
# name = "lxdfan0"
#
# [networks.config]
# "bridge.mode" = "fan"
"#
    .to_string()
}
