//! Interface state snapshot construction.
//!
//! [`StateBuilder`] correlates one live [`LinkInfo`] with the attribute tree
//! to produce a [`NetworkState`]. The tree is kernel-controlled and may
//! change under us, so every attribute read is best-effort: a file that is
//! missing, unreadable, or garbled leaves only its own field at the zero
//! value. Only the presence of the `bonding` / `bridge` marker directories
//! decides whether the corresponding detail exists at all.

use std::io;
use std::path::{Path, PathBuf};

use super::{
    Address, AttributeTree, Bond, BondField, Bridge, BridgeField, CounterCollector,
    EnumerationError, LinkInfo, LinkSource, NetworkState, classify_link,
};

const BONDING_DIR: &str = "bonding";
const BRIDGE_DIR: &str = "bridge";
const BRIDGE_PORTS_DIR: &str = "brif";

/// Builds [`NetworkState`] snapshots.
///
/// Stateless between calls and safe to share across threads.
///
/// # Type Parameters
///
/// * `T` - The [`AttributeTree`] holding per-interface attributes
/// * `C` - The [`CounterCollector`] supplying traffic counters
#[derive(Debug, Clone)]
pub struct StateBuilder<T, C> {
    tree: T,
    counters: C,
}

impl<T, C> StateBuilder<T, C>
where
    T: AttributeTree,
    C: CounterCollector,
{
    /// Creates a builder.
    #[must_use]
    pub const fn new(tree: T, counters: C) -> Self {
        Self { tree, counters }
    }

    /// Looks up `name` in `source` and builds its snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the live interface list cannot be read
    /// or does not contain `name`.
    pub fn query<S: LinkSource + ?Sized>(
        &self,
        name: &str,
        source: &S,
    ) -> Result<NetworkState, EnumerationError> {
        let link = source.link(name)?;
        Ok(self.build(&link, source))
    }

    /// Builds the snapshot of one live interface.
    ///
    /// Never fails. If the address list is unavailable the snapshot has no
    /// addresses; every other field is still populated.
    pub fn build<S: LinkSource + ?Sized>(&self, link: &LinkInfo, source: &S) -> NetworkState {
        let (link_type, state) = classify_link(link.flags);

        let addresses = match source.addresses(&link.name) {
            Ok(raw) => parse_addresses(&link.name, &raw),
            Err(e) => {
                tracing::debug!(interface = %link.name, "Address listing failed: {e}");
                Vec::new()
            }
        };

        NetworkState {
            link_type,
            state,
            hwaddr: link.hwaddr.clone(),
            mtu: link.mtu,
            addresses,
            bond: self.read_bond(&link.name),
            bridge: self.read_bridge(&link.name),
            counters: self.counters.counters(&link.name),
        }
    }

    /// Reads bonding detail, or `None` if the device is not a bond master.
    #[must_use]
    pub fn read_bond(&self, name: &str) -> Option<Bond> {
        let dir = bonding_dir(name);
        if !self.tree.exists(&dir) {
            return None;
        }

        let mut bond = Bond::default();
        for field in BondField::ALL {
            let Some(text) = self.read_attr(&dir.join(field.file_name())) else {
                continue;
            };
            let stored = match field {
                BondField::Mode => store(&mut bond.mode, Some(first_token(&text))),
                BondField::TransmitPolicy => {
                    store(&mut bond.transmit_policy, Some(first_token(&text)))
                }
                BondField::UpDelay => store(&mut bond.up_delay, parse_uint(&text)),
                BondField::DownDelay => store(&mut bond.down_delay, parse_uint(&text)),
                BondField::MiiFrequency => store(&mut bond.mii_frequency, parse_uint(&text)),
                BondField::MiiState => store(&mut bond.mii_state, Some(text.trim().to_string())),
                BondField::LowerDevices => {
                    store(&mut bond.lower_devices, Some(split_words(&text)))
                }
            };
            if stored {
                bond.populated.insert(field);
            }
        }

        Some(bond)
    }

    /// Reads bridging detail, or `None` if the device is not a bridge.
    #[must_use]
    pub fn read_bridge(&self, name: &str) -> Option<Bridge> {
        let dir = bridge_dir(name);
        if !self.tree.exists(&dir) {
            return None;
        }

        let mut bridge = Bridge::default();
        let fields = [
            BridgeField::Id,
            BridgeField::Stp,
            BridgeField::ForwardDelay,
            BridgeField::VlanDefault,
            BridgeField::VlanFiltering,
        ];
        for field in fields {
            let Some(text) = self.read_attr(&dir.join(field.file_name())) else {
                continue;
            };
            let stored = match field {
                BridgeField::Id => store(&mut bridge.id, Some(text.trim().to_string())),
                BridgeField::Stp => store(&mut bridge.stp, parse_uint(&text).map(|v| v == 1)),
                BridgeField::ForwardDelay => store(&mut bridge.forward_delay, parse_uint(&text)),
                BridgeField::VlanDefault => store(&mut bridge.vlan_default, parse_uint(&text)),
                BridgeField::VlanFiltering => {
                    store(&mut bridge.vlan_filtering, parse_uint(&text).map(|v| v == 1))
                }
                BridgeField::UpperDevices => false,
            };
            if stored {
                bridge.populated.insert(field);
            }
        }

        let ports = Path::new(name).join(BRIDGE_PORTS_DIR);
        if self.tree.exists(&ports) {
            match self.tree.list(&ports) {
                Ok(entries) => {
                    bridge.upper_devices = entries;
                    bridge.populated.insert(BridgeField::UpperDevices);
                }
                Err(e) => trace_unreadable(&ports, &e),
            }
        }

        Some(bridge)
    }

    fn read_attr(&self, path: &Path) -> Option<String> {
        self.tree
            .read(path)
            .map_err(|e| trace_unreadable(path, &e))
            .ok()
    }
}

fn trace_unreadable(path: &Path, error: &io::Error) {
    tracing::trace!(path = %path.display(), "Attribute unavailable: {error}");
}

/// Stores `value` into `slot` if present, returning whether it was stored.
fn store<V>(slot: &mut V, value: Option<V>) -> bool {
    let Some(value) = value else {
        return false;
    };
    *slot = value;
    true
}

fn first_token(text: &str) -> String {
    text.split_whitespace().next().unwrap_or_default().to_string()
}

fn parse_uint(text: &str) -> Option<u64> {
    text.trim().parse().ok()
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Parses reported address strings, skipping any without a `/`.
fn parse_addresses(interface: &str, raw: &[String]) -> Vec<Address> {
    raw.iter()
        .filter_map(|entry| {
            let parsed = Address::parse(entry);
            if parsed.is_none() {
                tracing::debug!(interface, entry = %entry, "Skipping address without prefix");
            }
            parsed
        })
        .collect()
}

/// Path of an interface's bonding marker directory, relative to the tree root.
#[must_use]
pub fn bonding_dir(name: &str) -> PathBuf {
    Path::new(name).join(BONDING_DIR)
}

/// Path of an interface's bridge marker directory, relative to the tree root.
#[must_use]
pub fn bridge_dir(name: &str) -> PathBuf {
    Path::new(name).join(BRIDGE_DIR)
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
