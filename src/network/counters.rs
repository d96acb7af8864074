//! Traffic counter collection.

use std::path::PathBuf;

use super::{AttributeTree, Counters, SysfsTree};

/// Supplies traffic counters for an interface.
///
/// Implementations always return a value; a device without statistics
/// reports zeros.
pub trait CounterCollector: Send + Sync {
    /// Returns the counters for `name`.
    fn counters(&self, name: &str) -> Counters;
}

/// Reads counters from `<iface>/statistics/` in the attribute tree.
#[derive(Debug, Clone, Default)]
pub struct SysfsCounters<T = SysfsTree> {
    tree: T,
}

impl<T: AttributeTree> SysfsCounters<T> {
    /// Creates a collector over `tree`.
    #[must_use]
    pub const fn new(tree: T) -> Self {
        Self { tree }
    }

    fn read_counter(&self, name: &str, file: &str) -> u64 {
        let path: PathBuf = [name, "statistics", file].iter().collect();
        self.tree
            .read(&path)
            .ok()
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0)
    }
}

impl<T: AttributeTree> CounterCollector for SysfsCounters<T> {
    fn counters(&self, name: &str) -> Counters {
        Counters {
            bytes_received: self.read_counter(name, "rx_bytes"),
            bytes_sent: self.read_counter(name, "tx_bytes"),
            packets_received: self.read_counter(name, "rx_packets"),
            packets_sent: self.read_counter(name, "tx_packets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::MemoryTree;

    #[test]
    fn reads_statistics_files() {
        let tree = MemoryTree::new()
            .with_file("eth0/statistics/rx_bytes", "1024\n")
            .with_file("eth0/statistics/tx_bytes", "2048\n")
            .with_file("eth0/statistics/rx_packets", "10\n")
            .with_file("eth0/statistics/tx_packets", "20\n");

        let counters = SysfsCounters::new(tree).counters("eth0");

        assert_eq!(
            counters,
            Counters {
                bytes_received: 1024,
                bytes_sent: 2048,
                packets_received: 10,
                packets_sent: 20,
            }
        );
    }

    #[test]
    fn missing_or_garbled_files_are_zero() {
        let tree = MemoryTree::new()
            .with_file("eth0/statistics/rx_bytes", "lots")
            .with_unreadable("eth0/statistics/tx_bytes");

        assert_eq!(SysfsCounters::new(tree).counters("eth0"), Counters::default());
    }
}
