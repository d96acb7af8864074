//! Live network interface observation.
//!
//! This module provides types and traits for:
//! - Reading the per-interface attribute tree ([`AttributeTree`], [`SysfsTree`], [`MemoryTree`])
//! - Describing live links ([`LinkInfo`], [`LinkFlags`], [`LinkSource`])
//! - Building state snapshots ([`StateBuilder`], [`NetworkState`])
//! - Collecting counters ([`CounterCollector`], [`SysfsCounters`])
//! - Enumerating interface names ([`enumerate_interfaces`])
//! - Platform-specific address listing ([`platform`])

mod builder;
mod counters;
mod enumerate;
mod link;
pub mod platform;
mod source;
mod state;
mod tree;

pub use builder::{StateBuilder, bonding_dir, bridge_dir};
pub use counters::{CounterCollector, SysfsCounters};
pub use enumerate::{enumerate_interfaces, merge_interface_names};
pub use link::{
    AddressListError, EnumerationError, LinkFlags, LinkInfo, LinkSource, LinkState, LinkType,
    classify_link,
};
pub use source::SysfsLinkSource;
pub use state::{
    Address, AddressFamily, AddressScope, Bond, BondField, Bridge, BridgeField, Counters,
    NetworkState,
};
pub use tree::{AttributeTree, MemoryTree, SYSFS_NET_ROOT, SysfsTree};
