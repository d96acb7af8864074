//! Platform-specific interface address listing.
//!
//! # Platform Support
//!
//! - **Unix**: Uses `getifaddrs` via the `nix` crate.
//! - **Other**: Not supported; every call returns [`AddressListError::Unsupported`].

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::interface_addresses;

#[cfg(not(unix))]
use super::AddressListError;

/// Lists the addresses of `name` as `address/prefix` strings.
///
/// # Errors
///
/// Always returns [`AddressListError::Unsupported`] on this platform.
#[cfg(not(unix))]
pub fn interface_addresses(_name: &str) -> Result<Vec<String>, AddressListError> {
    Err(AddressListError::Unsupported)
}
