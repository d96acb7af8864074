//! [`LinkSource`] backed by the attribute tree and the OS address list.

use std::path::{Component, Path};

use super::platform;
use super::{
    AddressListError, AttributeTree, EnumerationError, LinkFlags, LinkInfo, LinkSource, SysfsTree,
};

/// Reads links from the attribute tree's top-level entries.
///
/// Each entry's `address`, `mtu` and `flags` files fill in the descriptor.
/// An interface that disappears while being read keeps zero values rather
/// than failing the whole listing. Addresses come from the platform
/// address list ([`platform::interface_addresses`]).
#[derive(Debug, Clone, Default)]
pub struct SysfsLinkSource<T = SysfsTree> {
    tree: T,
}

impl<T: AttributeTree> SysfsLinkSource<T> {
    /// Creates a source over `tree`.
    #[must_use]
    pub const fn new(tree: T) -> Self {
        Self { tree }
    }

    fn describe(&self, name: &str) -> LinkInfo {
        let read = |file: &str| self.tree.read(&Path::new(name).join(file)).ok();

        let hwaddr = read("address").map(|s| s.trim().to_string()).unwrap_or_default();
        let mtu = read("mtu")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default();
        let flags = read("flags")
            .and_then(|s| LinkFlags::parse_hex(&s))
            .unwrap_or_default();

        LinkInfo::new(name, hwaddr, mtu, flags)
    }
}

impl<T: AttributeTree> LinkSource for SysfsLinkSource<T> {
    fn links(&self) -> Result<Vec<LinkInfo>, EnumerationError> {
        let names = self
            .tree
            .list(Path::new(""))
            .map_err(EnumerationError::ListLinks)?;
        Ok(names.iter().map(|name| self.describe(name)).collect())
    }

    fn addresses(&self, name: &str) -> Result<Vec<String>, AddressListError> {
        platform::interface_addresses(name)
    }

    fn link(&self, name: &str) -> Result<LinkInfo, EnumerationError> {
        if !is_link_name(name) || !self.tree.exists(Path::new(name)) {
            return Err(EnumerationError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(self.describe(name))
    }
}

/// True if `name` can only refer to a top-level entry of the tree.
fn is_link_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains('/')
        && matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{MemoryTree, StateBuilder, SysfsCounters};

    fn tree() -> MemoryTree {
        MemoryTree::new()
            .with_file("eth0/address", "00:16:3e:00:00:01\n")
            .with_file("eth0/mtu", "1500\n")
            .with_file("eth0/flags", "0x1003\n")
            .with_file("lo/address", "00:00:00:00:00:00\n")
            .with_file("lo/mtu", "65536\n")
            .with_file("lo/flags", "0x9\n")
    }

    fn bond_tree() -> MemoryTree {
        MemoryTree::new()
            .with_file("bond0/flags", "0x1403\n")
            .with_file("bond0/bonding/mode", "balance-rr 0\n")
    }

    #[test]
    fn lists_every_top_level_entry() {
        let source = SysfsLinkSource::new(tree());

        let links = source.links().unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0],
            LinkInfo::new(
                "eth0",
                "00:16:3e:00:00:01",
                1500,
                LinkFlags::from_bits(0x1003)
            )
        );
        assert!(links[1].flags.contains(LinkFlags::LOOPBACK));
    }

    #[test]
    fn vanished_attributes_default_to_zero() {
        let source = SysfsLinkSource::new(MemoryTree::new().with_dir("dummy0"));

        let link = source.link("dummy0").unwrap();

        assert_eq!(link, LinkInfo::new("dummy0", "", 0, LinkFlags::default()));
    }

    #[test]
    fn link_reports_missing_interface() {
        let source = SysfsLinkSource::new(tree());
        assert!(matches!(
            source.link("eth9"),
            Err(EnumerationError::NotFound { .. })
        ));
    }

    #[test]
    fn nested_or_relative_names_are_not_links() {
        let source = SysfsLinkSource::new(bond_tree());

        for name in ["bond0/bonding", "bond0/", "", ".", "..", "../net"] {
            assert!(
                matches!(source.link(name), Err(EnumerationError::NotFound { .. })),
                "{name:?}"
            );
        }
        assert_eq!(source.link("bond0").unwrap().name, "bond0");
    }

    #[test]
    fn query_rejects_attribute_directory() {
        let tree = bond_tree();
        let builder = StateBuilder::new(tree.clone(), SysfsCounters::new(tree.clone()));
        let source = SysfsLinkSource::new(tree);

        assert!(matches!(
            builder.query("bond0/bonding", &source),
            Err(EnumerationError::NotFound { .. })
        ));
    }

    #[test]
    fn unlistable_root_is_enumeration_error() {
        let source = SysfsLinkSource::new(MemoryTree::new().with_unlistable_dir(""));
        assert!(matches!(
            source.links(),
            Err(EnumerationError::ListLinks(_))
        ));
    }
}
