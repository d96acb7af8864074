//! Cluster heartbeat snapshots.

use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::HeartbeatError;

/// One cluster member as seen by the last heartbeat round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMember {
    /// Member id.
    pub id: u64,
    /// Member name.
    pub name: String,
    /// Cluster address (`host:port`).
    pub address: String,
    /// Whether the member answered the last heartbeat.
    #[serde(default = "online_default")]
    pub online: bool,
}

const fn online_default() -> bool {
    true
}

impl ClusterMember {
    /// Returns the host part of the cluster address, without the port.
    ///
    /// Accepts `ip:port`, `[ipv6]:port`, or a bare IP. Anything else
    /// yields `None`.
    #[must_use]
    pub fn host(&self) -> Option<IpAddr> {
        self.address
            .parse::<SocketAddr>()
            .map(|addr| addr.ip())
            .or_else(|_| self.address.parse::<IpAddr>())
            .ok()
    }
}

/// Cluster membership view produced by the heartbeat mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatSnapshot {
    /// Every known member.
    #[serde(default)]
    pub members: Vec<ClusterMember>,
}

/// Supplies the latest heartbeat snapshot.
pub trait HeartbeatSource: Send + Sync {
    /// Returns the latest snapshot, or `None` if none has been produced yet.
    ///
    /// # Errors
    ///
    /// Returns [`HeartbeatError`] if a snapshot exists but cannot be read.
    fn latest(&self) -> Result<Option<HeartbeatSnapshot>, HeartbeatError>;
}

/// Reads the snapshot the cluster layer writes to a JSON file.
#[derive(Debug, Clone)]
pub struct FileHeartbeatSource {
    path: PathBuf,
}

impl FileHeartbeatSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the heartbeat file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeartbeatSource for FileHeartbeatSource {
    fn latest(&self) -> Result<Option<HeartbeatSnapshot>, HeartbeatError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(HeartbeatError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| HeartbeatError::Parse {
                path: self.path.clone(),
                source,
            })
    }
}
