//! netstate: host network interface state and network housekeeping
//!
//! A library for snapshotting kernel network interfaces (link flags,
//! addresses, bonding and bridge roles, counters), validating network
//! configuration values, attaching devices to the networks that claim them,
//! and keeping the DNS helper server lists of fan-mode bridges in sync with
//! cluster membership.

pub mod attach;
pub mod catalog;
pub mod config;
pub mod forkdns;
pub mod network;
pub mod validate;
