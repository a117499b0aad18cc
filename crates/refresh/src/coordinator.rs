//! Refresh cycle coordinator
//!
//! Runs one end-to-end cycle against the registry and decides between
//! publishing and abandoning. The coordinator is the only writer of the
//! registry; its state machine guarantees at most one cycle in flight.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

use bidhub_connectors::{ConnectorFactory, SupplierSource};
use bidhub_protocol::{SupplierId, SupplierSet};
use bidhub_registry::ConnectorRegistry;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::RefreshError;
use crate::metrics::RefreshMetrics;

/// Default timeout for fetching the supplier feed
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for building one connector
pub const DEFAULT_BUILD_TIMEOUT: Duration = Duration::from_secs(5);

/// Cycle timeouts
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Upper bound on `fetch_suppliers`
    pub fetch_timeout: Duration,
    /// Upper bound on each single `build`
    pub build_timeout: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            build_timeout: DEFAULT_BUILD_TIMEOUT,
        }
    }
}

/// Phase of the refresh state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RefreshState {
    /// No cycle running
    Idle = 0,
    /// Waiting on the supplier feed
    Fetching = 1,
    /// Building connectors into the staging generation
    Building = 2,
    /// Swapping the staging generation in
    Publishing = 3,
    /// Discarding the staging generation
    Abandoning = 4,
}

impl RefreshState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Fetching,
            2 => Self::Building,
            3 => Self::Publishing,
            4 => Self::Abandoning,
            _ => Self::Idle,
        }
    }

    /// Lowercase name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Building => "building",
            Self::Publishing => "publishing",
            Self::Abandoning => "abandoning",
        }
    }
}

/// Summary of a published cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Sequence of the newly active generation
    pub seq: u64,
    /// Connectors in the new generation
    pub connectors: usize,
    /// Suppliers whose build failed or timed out
    pub skipped: Vec<SupplierId>,
    /// Retired generations disposed right after the switch
    pub disposed: usize,
}

/// Result of one `run_cycle` call
#[derive(Debug)]
pub enum CycleOutcome {
    /// A new generation is active
    Published(PublishReport),
    /// The cycle failed; the active generation is unchanged
    Abandoned(RefreshError),
    /// Another cycle was in progress; this trigger was dropped
    Skipped,
    /// Cancellation fired before the cycle finished
    Cancelled,
}

impl CycleOutcome {
    /// Check if a generation was published
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Resets the state to `Idle` however the cycle ends (including drop)
struct IdleOnDrop<'a>(&'a AtomicU8);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(RefreshState::Idle as u8, Ordering::Release);
    }
}

/// Orchestrates refresh cycles for one registry
pub struct RefreshCoordinator<S, F: ConnectorFactory> {
    source: S,
    factory: F,
    registry: Arc<ConnectorRegistry<F::Connector>>,
    config: RefreshConfig,
    state: AtomicU8,
    metrics: RefreshMetrics,
}

impl<S, F> RefreshCoordinator<S, F>
where
    S: SupplierSource,
    F: ConnectorFactory,
{
    /// Create a coordinator writing into `registry`
    pub fn new(
        source: S,
        factory: F,
        registry: Arc<ConnectorRegistry<F::Connector>>,
        config: RefreshConfig,
    ) -> Self {
        Self {
            source,
            factory,
            registry,
            config,
            state: AtomicU8::new(RefreshState::Idle as u8),
            metrics: RefreshMetrics::new(),
        }
    }

    /// Current phase
    pub fn state(&self) -> RefreshState {
        RefreshState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Check if no cycle is running
    pub fn is_idle(&self) -> bool {
        self.state() == RefreshState::Idle
    }

    /// Registry this coordinator writes into
    pub fn registry(&self) -> &Arc<ConnectorRegistry<F::Connector>> {
        &self.registry
    }

    /// Get reference to metrics
    pub fn metrics(&self) -> &RefreshMetrics {
        &self.metrics
    }

    fn set_state(&self, state: RefreshState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Run one refresh cycle
    ///
    /// Returns `Skipped` without doing anything if a cycle is already in
    /// progress. If `cancel` fires mid-cycle, any staged work is discarded
    /// and the active generation is left as it was.
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> CycleOutcome {
        if self
            .state
            .compare_exchange(
                RefreshState::Idle as u8,
                RefreshState::Fetching as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            self.metrics.record_skipped();
            warn!(
                state = self.state().as_str(),
                "skipping refresh - previous cycle still in progress"
            );
            return CycleOutcome::Skipped;
        }
        let _idle = IdleOnDrop(&self.state);
        self.metrics.record_cycle();
        let started = Instant::now();

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.execute() => Some(result),
        };

        match result {
            Some(Ok(report)) => {
                self.metrics.record_published();
                info!(
                    seq = report.seq,
                    connectors = report.connectors,
                    skipped = report.skipped.len(),
                    disposed = report.disposed,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "refresh cycle published"
                );
                CycleOutcome::Published(report)
            }
            Some(Err(e)) => {
                self.metrics.record_abandoned();
                if e.is_invariant_violation() {
                    error!(error = %e, "refresh cycle abandoned - single-writer invariant broken");
                } else {
                    warn!(
                        error = %e,
                        active_seq = ?self.registry.active_seq(),
                        "refresh cycle abandoned, keeping active generation"
                    );
                }
                CycleOutcome::Abandoned(e)
            }
            None => {
                self.metrics.record_cancelled();
                info!("refresh cycle cancelled");
                CycleOutcome::Cancelled
            }
        }
    }

    /// Fetch, build, publish
    async fn execute(&self) -> Result<PublishReport, RefreshError> {
        let suppliers = self.fetch().await?;

        self.set_state(RefreshState::Building);
        let mut staging = self.registry.begin_staging()?;
        let mut skipped = Vec::new();

        for supplier in &suppliers {
            let id = supplier.supplier_id;
            match timeout(self.config.build_timeout, self.factory.build(supplier)).await {
                Ok(Ok(connector)) => {
                    self.registry.add(&mut staging, id, connector)?;
                    debug!(supplier = %id, name = %supplier.label(), "connector staged");
                }
                Ok(Err(e)) => {
                    self.metrics.record_build_failure();
                    warn!(supplier = %id, name = %supplier.label(), error = %e, "connector build failed, skipping supplier");
                    skipped.push(id);
                }
                Err(_) => {
                    self.metrics.record_build_failure();
                    warn!(
                        supplier = %id,
                        name = %supplier.label(),
                        timeout_ms = self.config.build_timeout.as_millis() as u64,
                        "connector build timed out, skipping supplier"
                    );
                    skipped.push(id);
                }
            }
        }

        if staging.is_empty() {
            self.set_state(RefreshState::Abandoning);
            self.registry.abort_staging(&mut staging);
            return Err(RefreshError::AllBuildsFailed {
                attempted: suppliers.len(),
            });
        }

        self.set_state(RefreshState::Publishing);
        let connectors = staging.len();
        let seq = self.registry.switch_generation(staging)?;
        let disposed = self.registry.dispose_retired();

        Ok(PublishReport {
            seq,
            connectors,
            skipped,
            disposed,
        })
    }

    /// Fetch and vet the supplier set
    async fn fetch(&self) -> Result<SupplierSet, RefreshError> {
        let source_name = self.source.describe();
        let fetched = match timeout(self.config.fetch_timeout, self.source.fetch_suppliers()).await {
            Ok(Ok(set)) => set,
            Ok(Err(error)) => return Err(RefreshError::Fetch { source_name, error }),
            Err(_) => {
                return Err(RefreshError::FetchTimedOut {
                    source_name,
                    timeout: self.config.fetch_timeout,
                });
            }
        };

        let total = fetched.len();
        let suppliers = fetched.active_only();
        info!(
            source = %source_name,
            suppliers = total,
            inactive = total - suppliers.len(),
            "supplier feed fetched"
        );

        if suppliers.is_empty() {
            return Err(RefreshError::EmptyFeed { fetched: total });
        }

        let mut seen = HashSet::with_capacity(suppliers.len());
        if let Some(supplier_id) = suppliers.ids().find(|id| !seen.insert(*id)) {
            return Err(RefreshError::MalformedFeed { supplier_id });
        }

        Ok(suppliers)
    }
}
