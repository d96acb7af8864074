//! Live link descriptors and the source that reports them.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Kernel `IFF_*` link flag bits, as exposed in `/sys/class/net/<if>/flags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LinkFlags(u32);

impl LinkFlags {
    /// Interface is administratively up.
    pub const UP: Self = Self(0x1);
    /// Interface supports broadcast.
    pub const BROADCAST: Self = Self(0x2);
    /// Interface is a loopback device.
    pub const LOOPBACK: Self = Self(0x8);
    /// Interface is a point-to-point link.
    pub const POINT_TO_POINT: Self = Self(0x10);

    /// Wraps raw flag bits. Unknown bits are kept.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parses the hexadecimal form the kernel writes (`0x1003`).
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        u32::from_str_radix(digits, 16).ok().map(Self)
    }
}

impl BitOr for LinkFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Link type derived from the flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkType {
    /// No recognised capability bit set.
    #[default]
    Unknown,
    /// Broadcast capable (Ethernet-like).
    Broadcast,
    /// Point-to-point (tunnels, PPP).
    PointToPoint,
    /// Loopback.
    Loopback,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Broadcast => write!(f, "broadcast"),
            Self::PointToPoint => write!(f, "point-to-point"),
            Self::Loopback => write!(f, "loopback"),
        }
    }
}

/// Administrative link state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    /// `IFF_UP` set.
    Up,
    /// `IFF_UP` clear.
    #[default]
    Down,
}

/// Type rules in evaluation order. Every rule is tested and the last match
/// wins, so a loopback device that also reports broadcast is `Loopback`.
const TYPE_RULES: [(LinkFlags, LinkType); 3] = [
    (LinkFlags::BROADCAST, LinkType::Broadcast),
    (LinkFlags::POINT_TO_POINT, LinkType::PointToPoint),
    (LinkFlags::LOOPBACK, LinkType::Loopback),
];

/// Classifies link type and state from flag bits.
#[must_use]
pub fn classify_link(flags: LinkFlags) -> (LinkType, LinkState) {
    let mut link_type = LinkType::Unknown;
    for (flag, candidate) in TYPE_RULES {
        if flags.contains(flag) {
            link_type = candidate;
        }
    }

    let state = if flags.contains(LinkFlags::UP) {
        LinkState::Up
    } else {
        LinkState::Down
    };

    (link_type, state)
}

/// One live interface as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Kernel interface name.
    pub name: String,
    /// Hardware address (`aa:bb:cc:dd:ee:ff`), empty if the link has none.
    pub hwaddr: String,
    /// Maximum transmission unit.
    pub mtu: u32,
    /// Raw link flags.
    pub flags: LinkFlags,
}

impl LinkInfo {
    /// Creates a link descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        hwaddr: impl Into<String>,
        mtu: u32,
        flags: LinkFlags,
    ) -> Self {
        Self {
            name: name.into(),
            hwaddr: hwaddr.into(),
            mtu,
            flags,
        }
    }
}

/// Failure to enumerate live interfaces.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// The OS interface list could not be read.
    #[error("Failed to list interfaces: {0}")]
    ListLinks(#[source] std::io::Error),

    /// No live interface has the requested name.
    #[error("Interface not found: {name}")]
    NotFound {
        /// The requested interface name
        name: String,
    },

    /// The configured network names could not be fetched.
    #[error("Failed to list configured networks: {0}")]
    Catalog(#[from] CatalogError),
}

/// Failure to list the addresses of one interface.
#[derive(Debug, Error)]
pub enum AddressListError {
    /// The OS call failed.
    #[error("Failed to list addresses of {name}: {source}")]
    Os {
        /// Interface name
        name: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Address listing is not available on this platform.
    #[error("Address listing is not supported on this platform")]
    Unsupported,
}

/// Source of live interface information.
///
/// Enables dependency injection: production code uses
/// [`super::SysfsLinkSource`], tests provide their own lists.
pub trait LinkSource: Send + Sync {
    /// Lists every live interface in OS enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::ListLinks`] if the OS list is unavailable.
    fn links(&self) -> Result<Vec<LinkInfo>, EnumerationError>;

    /// Lists the addresses of one interface as `address/prefix` strings,
    /// in the order the OS reports them.
    ///
    /// # Errors
    ///
    /// Returns [`AddressListError`] if the OS call fails.
    fn addresses(&self, name: &str) -> Result<Vec<String>, AddressListError>;

    /// Looks up one live interface by name.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::NotFound`] if no interface has that name.
    fn link(&self, name: &str) -> Result<LinkInfo, EnumerationError> {
        self.links()?
            .into_iter()
            .find(|link| link.name == name)
            .ok_or_else(|| EnumerationError::NotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod link_flags {
        use super::*;

        #[test]
        fn parses_kernel_hex() {
            let flags = LinkFlags::parse_hex("0x1003\n").unwrap();
            assert!(flags.contains(LinkFlags::UP));
            assert!(flags.contains(LinkFlags::BROADCAST));
            assert!(!flags.contains(LinkFlags::LOOPBACK));
            assert_eq!(flags.bits(), 0x1003);
        }

        #[test]
        fn parses_without_prefix() {
            assert_eq!(LinkFlags::parse_hex("9"), Some(LinkFlags::from_bits(9)));
        }

        #[test]
        fn rejects_garbage() {
            assert_eq!(LinkFlags::parse_hex("up"), None);
        }
    }

    mod classify {
        use super::*;

        #[test]
        fn no_bits_is_unknown_and_down() {
            assert_eq!(
                classify_link(LinkFlags::default()),
                (LinkType::Unknown, LinkState::Down)
            );
        }

        #[test]
        fn broadcast_up() {
            assert_eq!(
                classify_link(LinkFlags::BROADCAST | LinkFlags::UP),
                (LinkType::Broadcast, LinkState::Up)
            );
        }

        #[test]
        fn point_to_point_overrides_broadcast() {
            let (link_type, _) = classify_link(LinkFlags::BROADCAST | LinkFlags::POINT_TO_POINT);
            assert_eq!(link_type, LinkType::PointToPoint);
        }

        #[test]
        fn loopback_overrides_everything() {
            let flags = LinkFlags::BROADCAST | LinkFlags::POINT_TO_POINT | LinkFlags::LOOPBACK;
            let (link_type, state) = classify_link(flags);
            assert_eq!(link_type, LinkType::Loopback);
            assert_eq!(state, LinkState::Down);
        }

        #[test]
        fn type_serializes_kebab_case() {
            assert_eq!(
                serde_json::to_string(&LinkType::PointToPoint).unwrap(),
                "\"point-to-point\""
            );
            assert_eq!(serde_json::to_string(&LinkState::Up).unwrap(), "\"up\"");
        }
    }

    mod link_source {
        use super::*;

        struct FixedSource(Vec<LinkInfo>);

        impl LinkSource for FixedSource {
            fn links(&self) -> Result<Vec<LinkInfo>, EnumerationError> {
                Ok(self.0.clone())
            }

            fn addresses(&self, _name: &str) -> Result<Vec<String>, AddressListError> {
                Ok(vec![])
            }
        }

        #[test]
        fn link_finds_by_name() {
            let source = FixedSource(vec![
                LinkInfo::new("lo", "", 65536, LinkFlags::LOOPBACK),
                LinkInfo::new("eth0", "00:16:3e:00:00:01", 1500, LinkFlags::BROADCAST),
            ]);

            assert_eq!(source.link("eth0").unwrap().mtu, 1500);
        }

        #[test]
        fn link_reports_missing_name() {
            let source = FixedSource(vec![]);
            let error = source.link("eth9").unwrap_err();
            assert!(matches!(error, EnumerationError::NotFound { ref name } if name == "eth9"));
        }
    }
}
