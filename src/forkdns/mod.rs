//! DNS helper peer reconciliation for fan-mode bridges.
//!
//! This module provides types and traits for:
//! - Cluster heartbeat input ([`HeartbeatSnapshot`], [`HeartbeatSource`], [`FileHeartbeatSource`])
//! - The reconciliation pass ([`ForkdnsReconciler`], [`ManagedNetwork`], [`NetworkLoader`])
//! - File-backed server lists ([`ServersFileNetwork`], [`ServersFileLoader`])
//! - Periodic execution ([`ReconcileStream`])

mod error;
mod heartbeat;
mod reconciler;
mod servers;
mod task;

pub use error::{HeartbeatError, ReconcileError, RefreshError};
pub use heartbeat::{ClusterMember, FileHeartbeatSource, HeartbeatSnapshot, HeartbeatSource};
pub use reconciler::{ForkdnsReconciler, ManagedNetwork, NetworkLoader, PassReport};
pub use servers::{
    SERVERS_DIR, SERVERS_FILE, ServersFileLoader, ServersFileNetwork, peer_addresses,
};
pub use task::ReconcileStream;
