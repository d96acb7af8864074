//! Automatic attachment of host devices to managed networks.
//!
//! When a device appears on the host, [`auto_attach`] asks the catalog
//! whether a managed network declares it as an external interface and, if
//! so, hands it to an [`InterfaceAttacher`]. A device nobody claims is the
//! normal case and is not an error.
//!
//! # Concurrency
//!
//! Not idempotent under concurrent calls for the same device. Callers that
//! may receive overlapping hotplug events must serialize per device.

mod command;


pub use command::CommandAttacher;

use thiserror::Error;

use crate::catalog::NetworkCatalog;

/// Failure of the attachment operation itself.
#[derive(Debug, Error)]
pub enum AttachError {
    /// No attach mechanism is configured.
    #[error("No attach command configured")]
    NotConfigured,

    /// The attach hook could not be started.
    #[error("Failed to run attach command '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The attach hook ran but reported failure.
    #[error("Attaching {device} to {network} failed ({status}): {stderr}")]
    HookFailed {
        /// Target network
        network: String,
        /// Device being attached
        device: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },
}

/// Binds a host device into a network's bridge or link construct.
pub trait InterfaceAttacher: Send + Sync {
    /// Attaches `device` to `network`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError`] if the device could not be attached.
    fn attach(&self, network: &str, device: &str) -> Result<(), AttachError>;
}

/// Result of a successful [`auto_attach`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The device was attached to the named network.
    Attached {
        /// Network that claimed the device
        network: String,
    },
    /// No managed network claims the device; nothing was done.
    NoMatch,
}

/// Attaches `device` to the managed network that claims it, if any.
///
/// A catalog lookup failure is treated the same as no match.
///
/// # Errors
///
/// Returns [`AttachError`] if a network claims the device but the
/// attachment itself fails.
pub fn auto_attach<C, A>(
    catalog: &C,
    attacher: &A,
    device: &str,
) -> Result<AttachOutcome, AttachError>
where
    C: NetworkCatalog + ?Sized,
    A: InterfaceAttacher + ?Sized,
{
    let network = match catalog.network_with_interface(device) {
        Ok(Some(network)) => network,
        Ok(None) => {
            tracing::debug!(device, "No managed network claims device");
            return Ok(AttachOutcome::NoMatch);
        }
        Err(e) => {
            tracing::debug!(device, "Network lookup failed, skipping attach: {e}");
            return Ok(AttachOutcome::NoMatch);
        }
    };

    attacher.attach(&network.name, device)?;
    tracing::info!(device, network = %network.name, "Attached device to network");

    Ok(AttachOutcome::Attached {
        network: network.name,
    })
}
