//! Refresh scheduler with cron support
//!
//! Fires refresh cycles on a cron expression or a fixed interval. Each cycle
//! runs in its own tokio task so a slow feed never stalls the sweep of
//! retired generations.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bidhub_connectors::{ConnectorFactory, SupplierSource};
use chrono::Utc;
use cron::Schedule;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::coordinator::{CycleOutcome, RefreshCoordinator};

/// Default period for disposing retired generations
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10);

/// Cron expression that failed to parse
#[derive(Debug, Error)]
#[error("invalid refresh schedule '{expr}': {reason}")]
pub struct InvalidSchedule {
    /// The rejected expression
    pub expr: String,
    /// Parser message
    pub reason: String,
}

/// When refresh cycles fire
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Cron expression (seconds field first)
    Cron(Box<Schedule>),
    /// Fixed period between cycle starts
    Interval(Duration),
}

impl Trigger {
    /// Parse a cron expression
    pub fn cron(expr: &str) -> Result<Self, InvalidSchedule> {
        Schedule::from_str(expr)
            .map(|s| Self::Cron(Box::new(s)))
            .map_err(|e| InvalidSchedule {
                expr: expr.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fixed-period trigger
    pub fn every(period: Duration) -> Self {
        Self::Interval(period)
    }

    /// Time until the next fire, `None` if the schedule has no upcoming run
    pub fn next_delay(&self) -> Option<Duration> {
        match self {
            Self::Cron(schedule) => {
                let now = Utc::now();
                let next = schedule.upcoming(Utc).next()?;
                Some((next - now).to_std().unwrap_or(Duration::ZERO))
            }
            Self::Interval(period) => Some(*period),
        }
    }
}

/// Drives a coordinator from a trigger until cancelled
pub struct RefreshScheduler<S, F: ConnectorFactory> {
    coordinator: Arc<RefreshCoordinator<S, F>>,
    trigger: Trigger,
    run_on_start: bool,
    sweep_interval: Duration,
}

impl<S, F> RefreshScheduler<S, F>
where
    S: SupplierSource + 'static,
    F: ConnectorFactory + 'static,
{
    /// Create a scheduler for `coordinator`
    pub fn new(coordinator: Arc<RefreshCoordinator<S, F>>, trigger: Trigger) -> Self {
        Self {
            coordinator,
            trigger,
            run_on_start: true,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Whether to run a cycle immediately instead of waiting for the first fire
    pub fn with_run_on_start(mut self, run_on_start: bool) -> Self {
        self.run_on_start = run_on_start;
        self
    }

    /// Set the period for disposing retired generations
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Run the scheduler loop
    ///
    /// Returns once `cancel` fires and any in-flight cycle has wound down.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            trigger = ?self.trigger,
            run_on_start = self.run_on_start,
            sweep_interval = ?self.sweep_interval,
            "starting refresh scheduler"
        );

        let mut cycles: JoinSet<CycleOutcome> = JoinSet::new();
        let mut sweep = tokio::time::interval(self.sweep_interval);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
        sweep.reset();

        if self.run_on_start {
            self.spawn_cycle(&mut cycles, &cancel);
        }

        let mut next_fire = self.next_fire();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = sleep_until(next_fire) => {
                    self.spawn_cycle(&mut cycles, &cancel);
                    next_fire = self.next_fire();
                    debug!(next_in = ?next_fire.map(|t| t - Instant::now()), "next refresh scheduled");
                }
                _ = sweep.tick() => {
                    let disposed = self.coordinator.registry().dispose_retired();
                    if disposed > 0 {
                        debug!(disposed, "disposed retired generations");
                    }
                }
                Some(joined) = cycles.join_next(), if !cycles.is_empty() => {
                    if let Err(e) = joined {
                        warn!(error = %e, "refresh task failed");
                    }
                }
            }
        }

        // cycles observe the same token and discard their staging on the way out
        while let Some(joined) = cycles.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "refresh task failed during shutdown");
            }
        }
        info!("refresh scheduler stopped");
    }

    fn next_fire(&self) -> Option<Instant> {
        let delay = self.trigger.next_delay();
        if delay.is_none() {
            warn!(trigger = ?self.trigger, "refresh schedule has no upcoming runs");
        }
        delay.map(|d| Instant::now() + d)
    }

    fn spawn_cycle(&self, cycles: &mut JoinSet<CycleOutcome>, cancel: &CancellationToken) {
        if !self.coordinator.is_idle() {
            warn!(
                state = self.coordinator.state().as_str(),
                "skipping scheduled refresh - previous cycle still in progress"
            );
            self.coordinator.metrics().record_skipped();
            return;
        }

        let coordinator = Arc::clone(&self.coordinator);
        let cancel = cancel.clone();
        cycles.spawn(async move { coordinator.run_cycle(&cancel).await });
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
