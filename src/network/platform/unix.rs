//! `getifaddrs`-based address listing.

use nix::ifaddrs::getifaddrs;
use nix::sys::socket::SockaddrStorage;

use super::super::AddressListError;

/// Lists the addresses of `name` as `address/prefix` strings, in the order
/// the kernel reports them. Link-layer entries are skipped. Labelled IPv4
/// aliases (`eth0:1`) count as addresses of their interface.
///
/// # Errors
///
/// Returns [`AddressListError::Os`] if `getifaddrs` fails.
pub fn interface_addresses(name: &str) -> Result<Vec<String>, AddressListError> {
    let entries = getifaddrs().map_err(|errno| AddressListError::Os {
        name: name.to_string(),
        source: errno.into(),
    })?;

    Ok(entries
        .filter(|entry| belongs_to(&entry.interface_name, name))
        .filter_map(|entry| format_address(entry.address.as_ref()?, entry.netmask.as_ref()))
        .collect())
}

/// True if a `getifaddrs` entry named `entry` is an address of `interface`.
fn belongs_to(entry: &str, interface: &str) -> bool {
    entry
        .strip_prefix(interface)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
}

fn format_address(address: &SockaddrStorage, netmask: Option<&SockaddrStorage>) -> Option<String> {
    if let Some(v4) = address.as_sockaddr_in() {
        let prefix = netmask
            .and_then(SockaddrStorage::as_sockaddr_in)
            .map_or(32, |mask| u32::from(mask.ip()).count_ones());
        return Some(format!("{}/{prefix}", v4.ip()));
    }

    if let Some(v6) = address.as_sockaddr_in6() {
        let prefix = netmask
            .and_then(SockaddrStorage::as_sockaddr_in6)
            .map_or(128, |mask| u128::from(mask.ip()).count_ones());
        return Some(format!("{}/{prefix}", v6.ip()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_alias_belongs_to_its_interface() {
        assert!(belongs_to("eth0", "eth0"));
        assert!(belongs_to("eth0:1", "eth0"));
        assert!(belongs_to("eth0:web", "eth0"));
    }

    #[test]
    fn similar_names_are_other_interfaces() {
        assert!(!belongs_to("eth01", "eth0"));
        assert!(!belongs_to("eth0.100", "eth0"));
        assert!(!belongs_to("eth", "eth0"));
        assert!(!belongs_to("veth0", "eth0"));
    }

    #[test]
    fn unknown_interface_has_no_addresses() {
        let addresses = interface_addresses("no-such-if0").unwrap();
        assert!(addresses.is_empty());
    }

    #[test]
    fn every_entry_has_a_prefix() {
        for entry in getifaddrs().unwrap() {
            for address in interface_addresses(&entry.interface_name).unwrap() {
                assert!(address.contains('/'), "{address}");
            }
        }
    }
}
