//! Error types for configuration value validation.

use std::fmt;

use thiserror::Error;

/// Address family expected by a CIDR validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// IPv4.
    V4,
    /// IPv6.
    V6,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Reason a raw configuration value was rejected.
///
/// Always recoverable. The display string is meant to be shown as-is
/// by whatever surface collected the value.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Name collides with dynamically created virtual link pairs.
    #[error("Interface name cannot be prefix with veth")]
    EphemeralPrefix,

    /// Name shorter than the minimum.
    #[error("Interface name is too short (minimum 2 characters)")]
    TooShort,

    /// Name longer than the kernel allows.
    #[error("Interface name is too long (maximum 15 characters)")]
    TooLong,

    /// Name contains characters outside `[A-Za-z0-9._-]`.
    #[error("Interface name contains invalid characters")]
    InvalidCharacters,

    /// Value is not a base-10 integer.
    #[error("Invalid value for an integer: {value}")]
    NotAnInteger {
        /// The rejected value
        value: String,
    },

    /// Integer outside the accepted port range.
    #[error("Invalid port number: {value}")]
    PortOutOfRange {
        /// The rejected value
        value: String,
    },

    /// Value does not parse as an address in CIDR notation.
    #[error("Invalid CIDR address '{value}': {source}")]
    InvalidCidr {
        /// The rejected value
        value: String,
        /// Underlying parse error
        #[source]
        source: ipnet::AddrParseError,
    },

    /// Parsed fine, but the address belongs to the other family.
    #[error("Not an {expected} address: {value}")]
    WrongFamily {
        /// Family the validator requires
        expected: Family,
        /// The rejected value
        value: String,
    },

    /// Address equals the subnet's network address.
    #[error("Not a usable {family} address: {value}")]
    NotUsableHost {
        /// Family of the address
        family: Family,
        /// The rejected value
        value: String,
    },
}
