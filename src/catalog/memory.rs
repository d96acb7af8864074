//! In-memory catalog built from the configuration file.

use super::{CatalogError, NetworkCatalog, NetworkDefinition};

/// [`NetworkCatalog`] over a fixed list of definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    networks: Vec<NetworkDefinition>,
}

impl StaticCatalog {
    /// Creates a catalog from definitions, keeping their order.
    #[must_use]
    pub const fn new(networks: Vec<NetworkDefinition>) -> Self {
        Self { networks }
    }
}

impl NetworkCatalog for StaticCatalog {
    fn network_names(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.networks.iter().map(|n| n.name.clone()).collect())
    }

    fn non_pending_network_names(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self
            .networks
            .iter()
            .filter(|n| !n.is_pending())
            .map(|n| n.name.clone())
            .collect())
    }

    fn network(&self, name: &str) -> Result<NetworkDefinition, CatalogError> {
        self.networks
            .iter()
            .find(|n| n.name == name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }

    fn network_with_interface(
        &self,
        device: &str,
    ) -> Result<Option<NetworkDefinition>, CatalogError> {
        Ok(self
            .networks
            .iter()
            .find(|n| n.external_interfaces().contains(&device))
            .cloned())
    }
}
