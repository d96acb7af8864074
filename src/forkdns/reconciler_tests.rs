//! Tests for the reconciliation pass.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::*;
use crate::catalog::{NetworkStatus, StaticCatalog};
use crate::forkdns::ClusterMember;

/// Shared log of refresh attempts, in order.
type Attempts = Arc<Mutex<Vec<String>>>;

struct FakeNetwork {
    definition: NetworkDefinition,
    fail_refresh: bool,
    attempts: Attempts,
}

impl ManagedNetwork for FakeNetwork {
    fn definition(&self) -> &NetworkDefinition {
        &self.definition
    }

    fn refresh_forkdns_servers(&self, _heartbeat: &HeartbeatSnapshot) -> Result<(), RefreshError> {
        self.attempts
            .lock()
            .unwrap()
            .push(self.definition.name.clone());
        if self.fail_refresh {
            return Err(RefreshError::Write {
                path: "servers.conf".into(),
                source: std::io::Error::other("read-only filesystem"),
            });
        }
        Ok(())
    }
}

struct FakeLoader {
    catalog: StaticCatalog,
    failing_refresh: HashSet<&'static str>,
    failing_load: HashSet<&'static str>,
    attempts: Attempts,
}

impl FakeLoader {
    fn new(catalog: StaticCatalog) -> Self {
        Self {
            catalog,
            failing_refresh: HashSet::new(),
            failing_load: HashSet::new(),
            attempts: Attempts::default(),
        }
    }

    fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

impl NetworkLoader for FakeLoader {
    type Network = FakeNetwork;

    fn load(&self, name: &str) -> Result<FakeNetwork, CatalogError> {
        if self.failing_load.contains(name) {
            return Err(CatalogError::Unavailable {
                message: format!("{name} is locked"),
            });
        }
        Ok(FakeNetwork {
            definition: self.catalog.network(name)?,
            fail_refresh: self.failing_refresh.contains(name),
            attempts: Arc::clone(&self.attempts),
        })
    }
}

fn fan(name: &str) -> NetworkDefinition {
    NetworkDefinition::bridge(name).with_config("bridge.mode", "fan")
}

fn heartbeat() -> HeartbeatSnapshot {
    HeartbeatSnapshot {
        members: vec![ClusterMember {
            id: 1,
            name: "node1".to_string(),
            address: "10.0.0.1:8443".to_string(),
            online: true,
        }],
    }
}

fn reconciler(networks: Vec<NetworkDefinition>) -> ForkdnsReconciler<StaticCatalog, FakeLoader> {
    let catalog = StaticCatalog::new(networks);
    ForkdnsReconciler::new(catalog.clone(), FakeLoader::new(catalog))
}

#[test]
fn refreshes_only_fan_bridges() {
    let reconciler = reconciler(vec![
        fan("fan0"),
        NetworkDefinition::bridge("lxdbr0"),
        fan("fan1"),
    ]);

    let report = reconciler.run_pass(&heartbeat()).unwrap();

    assert_eq!(report.visited, 3);
    assert_eq!(report.refreshed, vec!["fan0", "fan1"]);
    assert_eq!(reconciler.loader.attempts(), vec!["fan0", "fan1"]);
}

#[test]
fn pending_networks_are_not_loaded() {
    let reconciler = reconciler(vec![
        fan("fan0").with_status(NetworkStatus::Pending),
        fan("fan1"),
    ]);

    let report = reconciler.run_pass(&heartbeat()).unwrap();

    assert_eq!(report.visited, 1);
    assert_eq!(report.refreshed, vec!["fan1"]);
}

#[test]
fn refresh_failure_aborts_remaining_networks() {
    let mut reconciler = reconciler(vec![fan("fan0"), fan("fan1"), fan("fan2")]);
    reconciler.loader.failing_refresh.insert("fan1");

    let result = reconciler.run_pass(&heartbeat());

    assert!(matches!(
        result,
        Err(ReconcileError::Refresh { ref name, .. }) if name == "fan1"
    ));
    assert_eq!(reconciler.loader.attempts(), vec!["fan0", "fan1"]);
}

#[test]
fn load_failure_aborts_pass() {
    let mut reconciler = reconciler(vec![fan("fan0"), fan("fan1")]);
    reconciler.loader.failing_load.insert("fan0");

    let result = reconciler.run_pass(&heartbeat());

    assert!(matches!(
        result,
        Err(ReconcileError::Load { ref name, .. }) if name == "fan0"
    ));
    assert!(reconciler.loader.attempts().is_empty());
}

#[test]
fn list_failure_aborts_pass() {
    struct BrokenCatalog;

    impl NetworkCatalog for BrokenCatalog {
        fn network_names(&self) -> Result<Vec<String>, CatalogError> {
            unreachable!("not used by the reconciler")
        }

        fn non_pending_network_names(&self) -> Result<Vec<String>, CatalogError> {
            Err(CatalogError::Unavailable {
                message: "database offline".to_string(),
            })
        }

        fn network(&self, name: &str) -> Result<NetworkDefinition, CatalogError> {
            Err(CatalogError::NotFound {
                name: name.to_string(),
            })
        }

        fn network_with_interface(
            &self,
            _device: &str,
        ) -> Result<Option<NetworkDefinition>, CatalogError> {
            Ok(None)
        }
    }

    let loader = FakeLoader::new(StaticCatalog::default());
    let reconciler = ForkdnsReconciler::new(BrokenCatalog, loader);

    let result = reconciler.run_pass(&heartbeat());

    assert!(matches!(result, Err(ReconcileError::ListNetworks(_))));
}

#[test]
fn empty_catalog_is_empty_pass() {
    let reconciler = reconciler(vec![]);

    let report = reconciler.run_pass(&heartbeat()).unwrap();

    assert_eq!(report, PassReport::default());
}
