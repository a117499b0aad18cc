//! Bidhub - Refresh
//!
//! Keeps the connector registry in step with the supplier feed.
//!
//! One refresh cycle runs `fetch → build → publish | abandon`:
//!
//! ```text
//! Idle → Fetching → Building → Publishing → Idle
//!           │           └────→ Abandoning → Idle
//!           └─ fetch error / empty feed ──→ Idle
//! ```
//!
//! - **Stale beats empty**: any failure leaves the active generation alone
//! - **One bad supplier is not fatal**: failed builds are skipped
//! - **Serialized cycles**: a trigger that fires mid-cycle is dropped
//!
//! The `RefreshScheduler` fires cycles from a cron expression or a fixed
//! interval and sweeps retired generations between cycles.

mod coordinator;
mod error;
mod metrics;
mod scheduler;

pub use coordinator::{CycleOutcome, PublishReport, RefreshConfig, RefreshCoordinator, RefreshState};
pub use error::RefreshError;
pub use metrics::RefreshMetrics;
pub use scheduler::{InvalidSchedule, RefreshScheduler, Trigger};

#[cfg(test)]
mod test_support;
