//! The reconciliation pass.

use crate::catalog::{CatalogError, NetworkCatalog, NetworkDefinition};

use super::{HeartbeatSnapshot, ReconcileError, RefreshError};

/// Live runtime representation of a configured network.
pub trait ManagedNetwork {
    /// The network's definition as loaded.
    fn definition(&self) -> &NetworkDefinition;

    /// Rewrites the DNS helper's peer list from `heartbeat`.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] if the new list could not be stored.
    fn refresh_forkdns_servers(&self, heartbeat: &HeartbeatSnapshot) -> Result<(), RefreshError>;
}

/// Loads networks by name.
pub trait NetworkLoader: Send + Sync {
    /// The loaded network type.
    type Network: ManagedNetwork;

    /// Loads the runtime representation of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the network cannot be loaded.
    fn load(&self, name: &str) -> Result<Self::Network, CatalogError>;
}

/// Summary of a completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Networks loaded during the pass.
    pub visited: usize,
    /// Fan bridges whose server list was refreshed, in visit order.
    pub refreshed: Vec<String>,
}

/// Keeps the DNS helper server list of every fan bridge current.
///
/// # Failure Semantics
///
/// A pass is sequential and stops at the first error from listing,
/// loading, or refreshing. Networks after the failing one are not touched
/// until the next pass, which retries everything.
///
/// # Type Parameters
///
/// * `C` - The [`NetworkCatalog`] listing non-pending networks
/// * `L` - The [`NetworkLoader`] producing runtime networks
#[derive(Debug)]
pub struct ForkdnsReconciler<C, L> {
    catalog: C,
    loader: L,
}

impl<C, L> ForkdnsReconciler<C, L>
where
    C: NetworkCatalog,
    L: NetworkLoader,
{
    /// Creates a reconciler.
    #[must_use]
    pub const fn new(catalog: C, loader: L) -> Self {
        Self { catalog, loader }
    }

    /// Runs one reconciliation pass against `heartbeat`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReconcileError`] encountered; the pass stops there.
    pub fn run_pass(&self, heartbeat: &HeartbeatSnapshot) -> Result<PassReport, ReconcileError> {
        let names = self
            .catalog
            .non_pending_network_names()
            .map_err(ReconcileError::ListNetworks)?;

        let mut report = PassReport::default();
        for name in names {
            let network = self
                .loader
                .load(&name)
                .map_err(|source| ReconcileError::Load {
                    name: name.clone(),
                    source,
                })?;
            report.visited += 1;

            if !network.definition().is_fan_bridge() {
                continue;
            }

            network
                .refresh_forkdns_servers(heartbeat)
                .map_err(|source| ReconcileError::Refresh {
                    name: name.clone(),
                    source,
                })?;
            tracing::debug!(network = %name, "Refreshed forkdns servers");
            report.refreshed.push(name);
        }

        Ok(report)
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
