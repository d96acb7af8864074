//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default root of the kernel's per-interface attribute tree.
pub const SYSFS_ROOT: &str = crate::network::SYSFS_NET_ROOT;

/// Default directory for per-network state (DNS helper server lists).
pub const STATE_DIR: &str = "/var/lib/netstate";

/// Default path of the cluster heartbeat snapshot.
pub const HEARTBEAT_FILE: &str = "/var/lib/netstate/heartbeat.json";

/// Default reconciliation interval in seconds.
pub const RECONCILE_INTERVAL_SECS: u64 = 30;
