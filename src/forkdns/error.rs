//! Error types for forkdns reconciliation.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;

/// Failure to obtain a heartbeat snapshot.
#[derive(Debug, Error)]
pub enum HeartbeatError {
    /// The heartbeat file exists but could not be read.
    #[error("Failed to read heartbeat file '{}': {source}", path.display())]
    Read {
        /// Path to the heartbeat file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The heartbeat file is not valid JSON.
    #[error("Invalid heartbeat data in '{}': {source}", path.display())]
    Parse {
        /// Path to the heartbeat file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to refresh one network's DNS helper server list.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The server list could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a reconciliation pass.
///
/// Any of these aborts the whole pass; networks not yet visited are left
/// for the next interval. The message names the failed step only; the
/// cause is available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The heartbeat snapshot could not be obtained.
    #[error("Failed to obtain heartbeat")]
    Heartbeat(#[from] HeartbeatError),

    /// The list of non-pending networks could not be fetched.
    #[error("Failed to list networks")]
    ListNetworks(#[source] CatalogError),

    /// A network could not be loaded.
    #[error("Failed to load network {name}")]
    Load {
        /// Network name
        name: String,
        /// Underlying catalog error
        #[source]
        source: CatalogError,
    },

    /// A network's server list could not be refreshed.
    #[error("Failed to refresh forkdns servers of {name}")]
    Refresh {
        /// Network name
        name: String,
        /// Underlying refresh error
        #[source]
        source: RefreshError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn refresh_error_names_network_and_chains_source() {
        let error = ReconcileError::Refresh {
            name: "lxdfan0".to_string(),
            source: RefreshError::Write {
                path: PathBuf::from("/var/lib/netstate/servers.conf"),
                source: std::io::Error::other("disk full"),
            },
        };

        assert!(error.to_string().contains("lxdfan0"));
        assert!(error.source().unwrap().to_string().contains("disk full"));
    }

    #[test]
    fn list_networks_preserves_catalog_error() {
        let error = ReconcileError::ListNetworks(CatalogError::Unavailable {
            message: "locked".to_string(),
        });
        assert_eq!(error.to_string(), "Failed to list networks");
        assert!(error.source().unwrap().to_string().contains("locked"));
    }

    #[test]
    fn load_message_does_not_repeat_cause() {
        let error = ReconcileError::Load {
            name: "lxdfan0".to_string(),
            source: CatalogError::Unavailable {
                message: "locked".to_string(),
            },
        };

        assert_eq!(error.to_string(), "Failed to load network lxdfan0");
        assert!(error.source().unwrap().to_string().contains("locked"));
    }
}
