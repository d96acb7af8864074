//! File-backed DNS helper server lists.
//!
//! Each fan bridge's DNS helper reads its peers from
//! `<state_dir>/networks/<name>/forkdns.servers/servers.conf`, one address
//! per line. Refreshing rewrites that file from the heartbeat snapshot.

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::catalog::{CatalogError, NetworkCatalog, NetworkDefinition};

use super::{HeartbeatSnapshot, ManagedNetwork, NetworkLoader, RefreshError};

/// Name of the server list file.
pub const SERVERS_FILE: &str = "servers.conf";

/// Directory holding the server list, relative to the network's state directory.
pub const SERVERS_DIR: &str = "forkdns.servers";

/// Computes the peer list for a DNS helper.
///
/// Takes the host part of every online member's address, leaving out the
/// local member. `local_address` matches either a member's full cluster
/// address (`ip:port`) or, when it is a bare IP, the host part. The result
/// is sorted and free of duplicates.
#[must_use]
pub fn peer_addresses(heartbeat: &HeartbeatSnapshot, local_address: Option<&str>) -> Vec<IpAddr> {
    let local_host = local_address.and_then(|address| address.parse::<IpAddr>().ok());

    heartbeat
        .members
        .iter()
        .filter(|member| member.online)
        .filter(|member| local_address != Some(member.address.as_str()))
        .filter_map(|member| {
            let host = member.host();
            if host.is_none() {
                tracing::debug!(
                    member = %member.name,
                    address = %member.address,
                    "Skipping member with unparsable address"
                );
            }
            host
        })
        .filter(|host| Some(*host) != local_host)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A network whose DNS helper reads peers from a servers file.
#[derive(Debug, Clone)]
pub struct ServersFileNetwork {
    definition: NetworkDefinition,
    servers_dir: PathBuf,
    local_address: Option<String>,
}

impl ServersFileNetwork {
    /// Returns the path of the server list file.
    #[must_use]
    pub fn servers_file(&self) -> PathBuf {
        self.servers_dir.join(SERVERS_FILE)
    }

    fn write_atomically(path: &Path, content: &str) -> Result<(), RefreshError> {
        let write_error = |source| RefreshError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
        std::fs::write(&temp_path, content).map_err(write_error)?;
        std::fs::rename(&temp_path, path).map_err(write_error)?;
        Ok(())
    }
}

impl ManagedNetwork for ServersFileNetwork {
    fn definition(&self) -> &NetworkDefinition {
        &self.definition
    }

    fn refresh_forkdns_servers(&self, heartbeat: &HeartbeatSnapshot) -> Result<(), RefreshError> {
        let peers = peer_addresses(heartbeat, self.local_address.as_deref());
        let content: String = peers.iter().map(|addr| format!("{addr}\n")).collect();

        let path = self.servers_file();
        if std::fs::read_to_string(&path).is_ok_and(|current| current == content) {
            tracing::trace!(network = %self.definition.name, "Forkdns servers unchanged");
            return Ok(());
        }

        Self::write_atomically(&path, &content)?;
        tracing::info!(
            network = %self.definition.name,
            peers = peers.len(),
            "Updated forkdns servers"
        );
        Ok(())
    }
}

/// Loads [`ServersFileNetwork`]s from a catalog.
///
/// # Type Parameters
///
/// * `C` - The [`NetworkCatalog`] holding definitions
#[derive(Debug, Clone)]
pub struct ServersFileLoader<C> {
    catalog: C,
    state_dir: PathBuf,
    local_address: Option<String>,
}

impl<C: NetworkCatalog> ServersFileLoader<C> {
    /// Creates a loader placing server files under `state_dir`.
    #[must_use]
    pub fn new(catalog: C, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            state_dir: state_dir.into(),
            local_address: None,
        }
    }

    /// Sets this member's cluster address, which is left out of every peer list.
    #[must_use]
    pub fn with_local_address(mut self, address: impl Into<String>) -> Self {
        self.local_address = Some(address.into());
        self
    }
}

impl<C: NetworkCatalog> NetworkLoader for ServersFileLoader<C> {
    type Network = ServersFileNetwork;

    fn load(&self, name: &str) -> Result<ServersFileNetwork, CatalogError> {
        let definition = self.catalog.network(name)?;
        let servers_dir = self
            .state_dir
            .join("networks")
            .join(&definition.name)
            .join(SERVERS_DIR);

        Ok(ServersFileNetwork {
            definition,
            servers_dir,
            local_address: self.local_address.clone(),
        })
    }
}
