//! Validation of user-supplied network configuration values.
//!
//! Every validator takes one raw string and either accepts it or returns a
//! [`ValidationError`] whose message says exactly what is wrong. None of them
//! perform I/O, so they can run anywhere a value is collected.
//!
//! For the port and CIDR validators the empty string means "unset" and is
//! always accepted. The name validator has no such exemption.

mod error;


pub use error::{Family, ValidationError};

use std::fmt;
use std::sync::LazyLock;

use ipnet::IpNet;
use regex::Regex;

/// Prefix of the kernel's dynamically numbered virtual link pairs.
pub const EPHEMERAL_PREFIX: &str = "veth";

/// Minimum interface name length.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum interface name length (`IFNAMSIZ` minus the trailing NUL).
pub const NAME_MAX_LEN: usize = 15;

/// Lowest accepted port number.
pub const PORT_MIN: i64 = 1;

/// Highest accepted port number.
///
/// One above the 16-bit ceiling; stored configuration already uses this bound.
pub const PORT_MAX: i64 = 65536;

static NAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_a-zA-Z0-9.]*$").expect("name charset pattern is valid"));

/// Checks a network interface name.
///
/// # Errors
///
/// Fails, in this order, if the name starts with [`EPHEMERAL_PREFIX`], is
/// shorter than [`NAME_MIN_LEN`] or longer than [`NAME_MAX_LEN`] bytes, or
/// contains a character outside `[A-Za-z0-9._-]`.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.starts_with(EPHEMERAL_PREFIX) {
        return Err(ValidationError::EphemeralPrefix);
    }

    if value.len() < NAME_MIN_LEN {
        return Err(ValidationError::TooShort);
    }

    if value.len() > NAME_MAX_LEN {
        return Err(ValidationError::TooLong);
    }

    if !NAME_CHARSET.is_match(value) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(())
}

/// Checks a port number.
///
/// # Errors
///
/// Fails if the value is not a base-10 integer or lies outside
/// `[PORT_MIN, PORT_MAX]`.
pub fn validate_port(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    let port: i64 = value.parse().map_err(|_| ValidationError::NotAnInteger {
        value: value.to_string(),
    })?;

    if !(PORT_MIN..=PORT_MAX).contains(&port) {
        return Err(ValidationError::PortOutOfRange {
            value: value.to_string(),
        });
    }

    Ok(())
}

/// Checks an IPv4 host address in CIDR notation (e.g. `10.0.0.1/24`).
///
/// # Errors
///
/// Fails if the value is not CIDR notation, is not a literal IPv4 address,
/// or names the bare network address of its subnet.
pub fn validate_ipv4_cidr(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    match parse_cidr(value)? {
        IpNet::V4(net) if net.addr() == net.network() => Err(ValidationError::NotUsableHost {
            family: Family::V4,
            value: value.to_string(),
        }),
        IpNet::V4(_) => Ok(()),
        IpNet::V6(_) => Err(ValidationError::WrongFamily {
            expected: Family::V4,
            value: value.to_string(),
        }),
    }
}

/// Checks an IPv6 host address in CIDR notation (e.g. `fd42::1/64`).
///
/// IPv4-mapped literals (`::ffff:a.b.c.d`) count as IPv4 and are rejected.
///
/// # Errors
///
/// Fails if the value is not CIDR notation, is an IPv4 form, or names the
/// bare network address of its subnet.
pub fn validate_ipv6_cidr(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    match parse_cidr(value)? {
        IpNet::V6(net) if net.addr().to_ipv4_mapped().is_some() => {
            Err(ValidationError::WrongFamily {
                expected: Family::V6,
                value: value.to_string(),
            })
        }
        IpNet::V6(net) if net.addr() == net.network() => Err(ValidationError::NotUsableHost {
            family: Family::V6,
            value: value.to_string(),
        }),
        IpNet::V6(_) => Ok(()),
        IpNet::V4(_) => Err(ValidationError::WrongFamily {
            expected: Family::V6,
            value: value.to_string(),
        }),
    }
}

fn parse_cidr(value: &str) -> Result<IpNet, ValidationError> {
    value
        .parse::<IpNet>()
        .map_err(|source| ValidationError::InvalidCidr {
            value: value.to_string(),
            source,
        })
}

/// Selects one of the validators by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    /// [`validate_name`]
    Name,
    /// [`validate_port`]
    Port,
    /// [`validate_ipv4_cidr`]
    Ipv4Cidr,
    /// [`validate_ipv6_cidr`]
    Ipv6Cidr,
}

impl ValidatorKind {
    /// Runs the selected validator against `value`.
    ///
    /// # Errors
    ///
    /// Returns whatever the selected validator rejects.
    pub fn check(self, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::Name => validate_name(value),
            Self::Port => validate_port(value),
            Self::Ipv4Cidr => validate_ipv4_cidr(value),
            Self::Ipv6Cidr => validate_ipv6_cidr(value),
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Port => write!(f, "port"),
            Self::Ipv4Cidr => write!(f, "ipv4-cidr"),
            Self::Ipv6Cidr => write!(f, "ipv6-cidr"),
        }
    }
}

/// Well-known network configuration keys.
pub mod key {
    /// IPv4 host address of the network in CIDR notation.
    pub const IPV4_ADDRESS: &str = "ipv4.address";
    /// IPv6 host address of the network in CIDR notation.
    pub const IPV6_ADDRESS: &str = "ipv6.address";
    /// Comma-separated host devices bridged into the network.
    pub const EXTERNAL_INTERFACES: &str = "bridge.external_interfaces";
    /// Bridge mode (`standard` or `fan`).
    pub const BRIDGE_MODE: &str = "bridge.mode";
    /// Suffix shared by every port-valued key.
    pub const PORT_SUFFIX: &str = ".port";
}

/// Checks one `key = value` pair of a network definition.
///
/// Keys without a known validator are accepted unchanged.
///
/// # Errors
///
/// Returns the validator's rejection for keys that have one.
pub fn validate_network_config(key: &str, value: &str) -> Result<(), ValidationError> {
    match key {
        key::IPV4_ADDRESS => validate_ipv4_cidr(value),
        key::IPV6_ADDRESS => validate_ipv6_cidr(value),
        key::EXTERNAL_INTERFACES => value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_for_each(validate_name),
        k if k.ends_with(key::PORT_SUFFIX) => validate_port(value),
        _ => Ok(()),
    }
}
