//! Read-only catalog of configured networks.
//!
//! The catalog is the source of truth for which networks exist, what state
//! they are in, and how they are configured. Persistence lives elsewhere;
//! this crate only reads through [`NetworkCatalog`].

mod definition;
mod memory;

pub use definition::{NetworkDefinition, NetworkStatus};
pub use memory::StaticCatalog;

use thiserror::Error;

/// Error type for catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No network has the requested name.
    #[error("Network not found: {name}")]
    NotFound {
        /// The requested network name
        name: String,
    },

    /// The backing store could not be queried.
    #[error("Catalog unavailable: {message}")]
    Unavailable {
        /// Description of the failure
        message: String,
    },
}

/// Read access to configured network definitions.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the reconciler and state queries
/// may consult the catalog from different tasks.
pub trait NetworkCatalog: Send + Sync {
    /// Names of every configured network, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be read.
    fn network_names(&self) -> Result<Vec<String>, CatalogError>;

    /// Names of every network whose status is not pending.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be read.
    fn non_pending_network_names(&self) -> Result<Vec<String>, CatalogError>;

    /// Fetches one network definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no such network exists.
    fn network(&self, name: &str) -> Result<NetworkDefinition, CatalogError>;

    /// Finds the network that declares `device` as one of its external
    /// interfaces. `Ok(None)` means no network claims the device.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be read.
    fn network_with_interface(
        &self,
        device: &str,
    ) -> Result<Option<NetworkDefinition>, CatalogError>;
}

impl<T: NetworkCatalog + ?Sized> NetworkCatalog for std::sync::Arc<T> {
    fn network_names(&self) -> Result<Vec<String>, CatalogError> {
        (**self).network_names()
    }

    fn non_pending_network_names(&self) -> Result<Vec<String>, CatalogError> {
        (**self).non_pending_network_names()
    }

    fn network(&self, name: &str) -> Result<NetworkDefinition, CatalogError> {
        (**self).network(name)
    }

    fn network_with_interface(
        &self,
        device: &str,
    ) -> Result<Option<NetworkDefinition>, CatalogError> {
        (**self).network_with_interface(device)
    }
}
