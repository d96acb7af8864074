//! Point-in-time interface state snapshot types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{LinkState, LinkType};

/// Snapshot of one live interface.
///
/// Built fresh per query and never mutated afterwards. `bond` and `bridge`
/// are `None` when the device has no such role, which is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkState {
    /// Link type from the flag bits.
    #[serde(rename = "type")]
    pub link_type: LinkType,
    /// Administrative state.
    pub state: LinkState,
    /// Hardware address.
    pub hwaddr: String,
    /// Maximum transmission unit.
    pub mtu: u32,
    /// Addresses in OS-reported order.
    pub addresses: Vec<Address>,
    /// Bonding detail, if the device is a bond master.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bond: Option<Bond>,
    /// Bridging detail, if the device is a bridge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<Bridge>,
    /// Traffic counters.
    pub counters: Counters,
}

/// Address family, decided purely by the presence of a colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4.
    Inet,
    /// IPv6.
    Inet6,
}

impl AddressFamily {
    /// Classifies the textual form of an address.
    #[must_use]
    pub fn classify(address: &str) -> Self {
        if address.contains(':') {
            Self::Inet6
        } else {
            Self::Inet
        }
    }
}

/// Address scope, decided purely by textual prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressScope {
    /// Routable.
    Global,
    /// Host-local (loopback).
    Local,
    /// Link-local.
    Link,
}

impl AddressScope {
    /// Classifies the textual form of an address.
    ///
    /// This is a prefix match on the literal text, not a subnet containment
    /// check: anything starting with `127` is local, including `1270::1`.
    #[must_use]
    pub fn classify(address: &str) -> Self {
        if address.starts_with("169.254") || address.starts_with("fe80:") {
            Self::Link
        } else if address.starts_with("127") || address == "::1" {
            Self::Local
        } else {
            Self::Global
        }
    }
}

/// One address assigned to an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Family.
    pub family: AddressFamily,
    /// Numeric address text.
    pub address: String,
    /// Prefix length (or mask) text, as reported.
    pub netmask: String,
    /// Scope.
    pub scope: AddressScope,
}

impl Address {
    /// Parses an `address/prefix` string.
    ///
    /// Returns `None` if there is no `/`. Only the first `/` splits.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (address, netmask) = raw.split_once('/')?;
        Some(Self {
            family: AddressFamily::classify(address),
            address: address.to_string(),
            netmask: netmask.to_string(),
            scope: AddressScope::classify(address),
        })
    }
}

/// Bonding attribute files, one per [`Bond`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BondField {
    /// `mode`
    Mode,
    /// `xmit_hash_policy`
    TransmitPolicy,
    /// `updelay`
    UpDelay,
    /// `downdelay`
    DownDelay,
    /// `miimon`
    MiiFrequency,
    /// `mii_status`
    MiiState,
    /// `slaves`
    LowerDevices,
}

impl BondField {
    /// Every field, in read order.
    pub const ALL: [Self; 7] = [
        Self::Mode,
        Self::TransmitPolicy,
        Self::UpDelay,
        Self::DownDelay,
        Self::MiiFrequency,
        Self::MiiState,
        Self::LowerDevices,
    ];

    /// Attribute file name under the bonding directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::TransmitPolicy => "xmit_hash_policy",
            Self::UpDelay => "updelay",
            Self::DownDelay => "downdelay",
            Self::MiiFrequency => "miimon",
            Self::MiiState => "mii_status",
            Self::LowerDevices => "slaves",
        }
    }
}

/// Bonding detail.
///
/// Each field is read independently. A field whose file was missing or
/// unreadable keeps its zero value and is absent from [`Bond::populated`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// Bonding mode name (e.g. `802.3ad`).
    pub mode: String,
    /// Transmit hash policy name (e.g. `layer2`).
    pub transmit_policy: String,
    /// Up delay in milliseconds.
    pub up_delay: u64,
    /// Down delay in milliseconds.
    pub down_delay: u64,
    /// MII polling interval in milliseconds.
    pub mii_frequency: u64,
    /// MII link state (`up` / `down`).
    pub mii_state: String,
    /// Enslaved devices.
    pub lower_devices: Vec<String>,
    /// Fields actually read from the device.
    #[serde(skip)]
    pub populated: BTreeSet<BondField>,
}

impl Bond {
    /// Returns true if `field` was read from the device.
    #[must_use]
    pub fn has(&self, field: BondField) -> bool {
        self.populated.contains(&field)
    }
}

/// Bridge attribute files and directories, one per [`Bridge`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BridgeField {
    /// `bridge_id`
    Id,
    /// `stp_state`
    Stp,
    /// `forward_delay`
    ForwardDelay,
    /// `default_pvid`
    VlanDefault,
    /// `vlan_filtering`
    VlanFiltering,
    /// The `brif` directory.
    UpperDevices,
}

impl BridgeField {
    /// Attribute file name under the bridge directory.
    ///
    /// `UpperDevices` is not a file; it lives in the sibling `brif` directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Id => "bridge_id",
            Self::Stp => "stp_state",
            Self::ForwardDelay => "forward_delay",
            Self::VlanDefault => "default_pvid",
            Self::VlanFiltering => "vlan_filtering",
            Self::UpperDevices => "brif",
        }
    }
}

/// Bridging detail. Same missing-file tolerance as [`Bond`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bridge {
    /// Bridge identifier (`8000.aabbccddeeff`).
    pub id: String,
    /// Spanning tree enabled.
    pub stp: bool,
    /// Forward delay in centiseconds.
    pub forward_delay: u64,
    /// Default VLAN id.
    pub vlan_default: u64,
    /// VLAN filtering enabled.
    pub vlan_filtering: bool,
    /// Ports attached to the bridge.
    pub upper_devices: Vec<String>,
    /// Fields actually read from the device.
    #[serde(skip)]
    pub populated: BTreeSet<BridgeField>,
}

impl Bridge {
    /// Returns true if `field` was read from the device.
    #[must_use]
    pub fn has(&self, field: BridgeField) -> bool {
        self.populated.contains(&field)
    }
}

/// Traffic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Bytes received.
    pub bytes_received: u64,
    /// Bytes sent.
    pub bytes_sent: u64,
    /// Packets received.
    pub packets_received: u64,
    /// Packets sent.
    pub packets_sent: u64,
}
