//! Network definition types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::key;

/// Lifecycle status of a configured network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    /// Defined but not yet created on every cluster member.
    Pending,
    /// Created and usable.
    #[default]
    Created,
    /// Creation failed.
    Errored,
    /// Status not recorded.
    Unknown,
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Created => write!(f, "created"),
            Self::Errored => write!(f, "errored"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One configured network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkDefinition {
    /// Network (and bridge device) name.
    pub name: String,

    /// Network type, e.g. `bridge`.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// Lifecycle status.
    #[serde(default)]
    pub status: NetworkStatus,

    /// Free-form `key = value` configuration.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

fn default_kind() -> String {
    "bridge".to_string()
}

impl NetworkDefinition {
    /// Creates a created bridge network with empty configuration.
    #[must_use]
    pub fn bridge(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: default_kind(),
            status: NetworkStatus::Created,
            config: BTreeMap::new(),
        }
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: NetworkStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Returns true if the network is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == NetworkStatus::Pending
    }

    /// Returns true if this is a fan-mode bridge.
    #[must_use]
    pub fn is_fan_bridge(&self) -> bool {
        self.config.get(key::BRIDGE_MODE).map(String::as_str) == Some("fan")
    }

    /// Host devices bridged into this network, from `bridge.external_interfaces`.
    #[must_use]
    pub fn external_interfaces(&self) -> Vec<&str> {
        self.config
            .get(key::EXTERNAL_INTERFACES)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
