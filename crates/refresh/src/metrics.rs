//! Refresh counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the refresh coordinator
#[derive(Debug, Default)]
pub struct RefreshMetrics {
    /// Cycles started
    pub cycles: AtomicU64,

    /// Cycles that published a generation
    pub published: AtomicU64,

    /// Cycles abandoned on error
    pub abandoned: AtomicU64,

    /// Triggers dropped because a cycle was in progress
    pub skipped: AtomicU64,

    /// Cycles cancelled by shutdown
    pub cancelled: AtomicU64,

    /// Individual supplier builds that failed
    pub build_failures: AtomicU64,
}

impl RefreshMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_abandoned(&self) {
        self.abandoned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancelled(&self) {
        self.cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_build_failure(&self) {
        self.build_failures.fetch_add(1, Ordering::Relaxed);
    }
}
