//! Scripted collaborators for refresh tests

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use bidhub_connectors::{ConnectorError, ConnectorFactory, SupplierSource};
use bidhub_protocol::{SupplierDefinition, SupplierId, SupplierSet};
use bidhub_registry::{ConnectorRegistry, Retire};
use parking_lot::Mutex;

use crate::coordinator::{RefreshConfig, RefreshCoordinator};

/// What the next fetch returns
#[derive(Debug, Clone)]
pub enum FeedScript {
    Suppliers(SupplierSet),
    Fail,
    Hang,
}

/// Supplier source replaying a scripted answer
#[derive(Debug)]
pub struct ScriptedSource {
    script: Mutex<FeedScript>,
    pub fetches: AtomicU64,
}

impl ScriptedSource {
    pub fn new(script: FeedScript) -> Self {
        Self {
            script: Mutex::new(script),
            fetches: AtomicU64::new(0),
        }
    }

    pub fn serving(ids: &[u64]) -> Self {
        Self::new(FeedScript::Suppliers(suppliers(ids)))
    }

    pub fn set(&self, script: FeedScript) {
        *self.script.lock() = script;
    }
}

impl SupplierSource for ScriptedSource {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn fetch_suppliers(&self) -> Result<SupplierSet, ConnectorError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let script = self.script.lock().clone();
        match script {
            FeedScript::Suppliers(set) => Ok(set),
            FeedScript::Fail => Err(ConnectorError::NotFound("http://feed/core/supplier".into())),
            FeedScript::Hang => std::future::pending().await,
        }
    }
}

/// Connector that records whether it was retired
#[derive(Debug)]
pub struct MockConnector {
    pub supplier_id: SupplierId,
    pub endpoint: String,
    retired: AtomicBool,
    retire_count: Arc<AtomicU64>,
}

impl MockConnector {
    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::SeqCst)
    }
}

impl Retire for MockConnector {
    fn retire(&self) {
        self.retired.store(true, Ordering::SeqCst);
        self.retire_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Factory with per-supplier failure injection
#[derive(Debug, Default)]
pub struct MockFactory {
    failing: Mutex<HashSet<u64>>,
    slow: Mutex<HashSet<u64>>,
    pub builds: AtomicU64,
    pub retired: Arc<AtomicU64>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds for these suppliers return an error
    pub fn fail(&self, ids: &[u64]) {
        self.failing.lock().extend(ids.iter().copied());
    }

    /// Builds for these suppliers never finish
    pub fn stall(&self, ids: &[u64]) {
        self.slow.lock().extend(ids.iter().copied());
    }

    pub fn heal(&self) {
        self.failing.lock().clear();
        self.slow.lock().clear();
    }

    pub fn retired_count(&self) -> u64 {
        self.retired.load(Ordering::SeqCst)
    }
}

impl ConnectorFactory for MockFactory {
    type Connector = MockConnector;

    async fn build(&self, supplier: &SupplierDefinition) -> Result<MockConnector, ConnectorError> {
        let raw = supplier.supplier_id.get();
        self.builds.fetch_add(1, Ordering::SeqCst);
        let stalled = self.slow.lock().contains(&raw);
        if stalled {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.lock().contains(&raw) {
            return Err(ConnectorError::invalid_endpoint(
                supplier.supplier_id,
                &supplier.endpoint,
                "scripted failure",
            ));
        }
        Ok(MockConnector {
            supplier_id: supplier.supplier_id,
            endpoint: supplier.endpoint.clone(),
            retired: AtomicBool::new(false),
            retire_count: Arc::clone(&self.retired),
        })
    }
}

pub type TestCoordinator = RefreshCoordinator<Arc<ScriptedSource>, Arc<MockFactory>>;

/// Active suppliers `ids` with endpoints `http://s<id>/bid`
pub fn suppliers(ids: &[u64]) -> SupplierSet {
    ids.iter()
        .map(|&n| SupplierDefinition::new(SupplierId::new(n), format!("http://s{n}/bid")))
        .collect()
}

pub fn id(n: u64) -> SupplierId {
    SupplierId::new(n)
}

/// Coordinator wired to fresh mocks and an empty registry
pub fn coordinator(
    source: ScriptedSource,
    config: RefreshConfig,
) -> (Arc<TestCoordinator>, Arc<ScriptedSource>, Arc<MockFactory>) {
    let source = Arc::new(source);
    let factory = Arc::new(MockFactory::new());
    let registry = Arc::new(ConnectorRegistry::new());
    let coordinator = RefreshCoordinator::new(
        Arc::clone(&source),
        Arc::clone(&factory),
        registry,
        config,
    );
    (Arc::new(coordinator), source, factory)
}
