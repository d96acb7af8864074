//! Interface name enumeration.

use crate::catalog::NetworkCatalog;
use crate::validate::EPHEMERAL_PREFIX;

use super::{EnumerationError, LinkSource};

/// Merges configured network names with live interface names.
///
/// Configured names come first, as given. Live names follow in OS order,
/// skipping ones already present and ephemeral `veth*` pair devices.
#[must_use]
pub fn merge_interface_names<I, S>(configured: Vec<String>, live: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names = configured;
    for name in live {
        let name = name.as_ref();
        if name.starts_with(EPHEMERAL_PREFIX) {
            continue;
        }
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Lists every configured network name plus every live interface.
///
/// # Errors
///
/// Returns [`EnumerationError`] if either the catalog or the live
/// interface list cannot be read. No partial list is returned.
pub fn enumerate_interfaces<C, S>(catalog: &C, source: &S) -> Result<Vec<String>, EnumerationError>
where
    C: NetworkCatalog + ?Sized,
    S: LinkSource + ?Sized,
{
    let configured = catalog.network_names()?;
    let live = source.links()?;
    Ok(merge_interface_names(
        configured,
        live.iter().map(|link| link.name.as_str()),
    ))
}
