//! Read-only access to the kernel's per-interface attribute tree.
//!
//! The builder never touches the filesystem directly. It goes through
//! [`AttributeTree`], so production code reads `/sys/class/net` via
//! [`SysfsTree`] while tests describe a device with [`MemoryTree`].
//!
//! All paths are relative to the tree root, e.g. `bond0/bonding/mode`.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default root of the per-interface attribute tree on Linux.
pub const SYSFS_NET_ROOT: &str = "/sys/class/net";

/// A hierarchy of small text attribute files and directories.
///
/// # Consistency
///
/// Nothing ties successive calls together. The kernel may add or remove
/// entries between two reads, so every caller must tolerate a file that
/// existed a moment ago returning `NotFound`.
pub trait AttributeTree: Send + Sync {
    /// Reads a whole attribute file as text.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file is missing or unreadable.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Lists the entry names of a directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory is missing or unlistable.
    fn list(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Returns true if a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

impl<T: AttributeTree + ?Sized> AttributeTree for &T {
    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).list(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

impl<T: AttributeTree + ?Sized> AttributeTree for Arc<T> {
    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).list(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// [`AttributeTree`] backed by a real directory (normally `/sys/class/net`).
#[derive(Debug, Clone)]
pub struct SysfsTree {
    root: PathBuf,
}

impl SysfsTree {
    /// Creates a tree rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for SysfsTree {
    fn default() -> Self {
        Self::new(SYSFS_NET_ROOT)
    }
}

impl AttributeTree for SysfsTree {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(path))
    }

    /// Entries are returned sorted by name, independent of on-disk order.
    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = std::fs::read_dir(self.root.join(path))?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).exists()
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryDir {
    entries: Vec<String>,
    listable: bool,
}

/// In-memory [`AttributeTree`] for describing devices in tests.
///
/// Adding a file registers every ancestor directory, so
/// `with_file("br0/bridge/stp_state", "1")` makes `br0/bridge` exist.
/// Directory listings keep insertion order.
///
/// # Example
///
/// ```
/// use netstate::network::{AttributeTree, MemoryTree};
/// use std::path::Path;
///
/// let tree = MemoryTree::new()
///     .with_file("bond0/bonding/mode", "802.3ad 4\n")
///     .with_unreadable("bond0/bonding/slaves");
///
/// assert!(tree.exists(Path::new("bond0/bonding")));
/// assert!(tree.read(Path::new("bond0/bonding/slaves")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, Option<String>>,
    dirs: BTreeMap<PathBuf, MemoryDir>,
}

impl MemoryTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a readable file.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        self.register_ancestors(path);
        self.files.insert(path.to_path_buf(), Some(content.into()));
        self
    }

    /// Adds a file that exists but fails to read.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.register_ancestors(path);
        self.files.insert(path.to_path_buf(), None);
        self
    }

    /// Adds a (possibly empty) listable directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.register_ancestors(path);
        self.dirs.entry(path.to_path_buf()).or_insert_with(|| MemoryDir {
            entries: Vec::new(),
            listable: true,
        });
        self
    }

    /// Adds a directory that exists but fails to list.
    #[must_use]
    pub fn with_unlistable_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.register_ancestors(path);
        self.dirs
            .entry(path.to_path_buf())
            .or_default()
            .listable = false;
        self
    }

    fn register_ancestors(&mut self, path: &Path) {
        let mut child = path;
        while let Some(parent) = child.parent() {
            let dir = self.dirs.entry(parent.to_path_buf()).or_insert_with(|| MemoryDir {
                entries: Vec::new(),
                listable: true,
            });
            if let Some(name) = child.file_name() {
                let name = name.to_string_lossy().into_owned();
                if !dir.entries.contains(&name) {
                    dir.entries.push(name);
                }
            }
            child = parent;
        }
    }
}

impl AttributeTree for MemoryTree {
    fn read(&self, path: &Path) -> io::Result<String> {
        match self.files.get(path) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is unreadable", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )),
        }
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        match self.dirs.get(path) {
            Some(dir) if dir.listable => Ok(dir.entries.clone()),
            Some(_) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is unlistable", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod memory_tree {
        use super::*;

        #[test]
        fn file_registers_ancestors() {
            let tree = MemoryTree::new().with_file("br0/bridge/stp_state", "1\n");

            assert!(tree.exists(Path::new("br0")));
            assert!(tree.exists(Path::new("br0/bridge")));
            assert_eq!(tree.list(Path::new("")).unwrap(), vec!["br0"]);
            assert_eq!(tree.list(Path::new("br0/bridge")).unwrap(), vec!["stp_state"]);
        }

        #[test]
        fn listing_keeps_insertion_order() {
            let tree = MemoryTree::new()
                .with_dir("br0/brif/eth1")
                .with_dir("br0/brif/eth0");

            assert_eq!(
                tree.list(Path::new("br0/brif")).unwrap(),
                vec!["eth1", "eth0"]
            );
        }

        #[test]
        fn unreadable_file_exists_but_fails() {
            let tree = MemoryTree::new().with_unreadable("bond0/bonding/slaves");

            assert!(tree.exists(Path::new("bond0/bonding/slaves")));
            let error = tree.read(Path::new("bond0/bonding/slaves")).unwrap_err();
            assert_eq!(error.kind(), io::ErrorKind::PermissionDenied);
        }

        #[test]
        fn missing_file_is_not_found() {
            let tree = MemoryTree::new();
            let error = tree.read(Path::new("eth0/mtu")).unwrap_err();
            assert_eq!(error.kind(), io::ErrorKind::NotFound);
        }

        #[test]
        fn unlistable_dir_exists_but_fails() {
            let tree = MemoryTree::new().with_unlistable_dir("br0/brif");

            assert!(tree.exists(Path::new("br0/brif")));
            assert!(tree.list(Path::new("br0/brif")).is_err());
        }
    }

    mod sysfs_tree {
        use super::*;

        #[test]
        fn reads_relative_to_root() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::create_dir_all(dir.path().join("eth0")).unwrap();
            std::fs::write(dir.path().join("eth0/mtu"), "1500\n").unwrap();

            let tree = SysfsTree::new(dir.path());

            assert_eq!(tree.read(Path::new("eth0/mtu")).unwrap(), "1500\n");
            assert!(tree.exists(Path::new("eth0")));
            assert!(!tree.exists(Path::new("eth1")));
        }

        #[test]
        fn lists_sorted_by_name() {
            let dir = tempfile::tempdir().unwrap();
            for name in ["wlan0", "eth0", "lo"] {
                std::fs::create_dir(dir.path().join(name)).unwrap();
            }

            let tree = SysfsTree::new(dir.path());

            assert_eq!(
                tree.list(Path::new("")).unwrap(),
                vec!["eth0", "lo", "wlan0"]
            );
        }

        #[test]
        fn default_root_is_sysfs() {
            assert_eq!(SysfsTree::default().root(), Path::new(SYSFS_NET_ROOT));
        }
    }
}
