//! Registry counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the connector registry
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    /// Total lookups served
    pub lookups: AtomicU64,

    /// Lookups that found a connector
    pub hits: AtomicU64,

    /// Lookups with no connector for the id (or no generation yet)
    pub misses: AtomicU64,

    /// Generations published
    pub switches: AtomicU64,

    /// Staging generations discarded, explicitly or by dropping the handle
    pub aborts: AtomicU64,

    /// Retired generations disposed
    pub disposed: AtomicU64,
}

impl RegistryMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_lookup(&self, hit: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_switch(&self) {
        self.switches.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_abort(&self) {
        self.aborts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_disposed(&self, count: u64) {
        self.disposed.fetch_add(count, Ordering::Relaxed);
    }
}
