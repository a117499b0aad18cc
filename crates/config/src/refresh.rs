//! Refresh schedule configuration

use serde::Deserialize;
use std::time::Duration;

/// Refresh schedule and cycle timeouts
///
/// # Example
///
/// ```toml
/// [refresh]
/// schedule = "0 */5 * * * *"   # cron, seconds first
/// run_on_start = true
/// fetch_timeout = "30s"
/// build_timeout = "5s"
/// ```
///
/// Without `schedule`, cycles fire every `interval`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Cron expression; takes precedence over `interval`
    pub schedule: Option<String>,

    /// Fixed period between cycles
    /// Default: 5m
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Run a cycle at startup instead of waiting for the first fire
    /// Default: true
    pub run_on_start: bool,

    /// Upper bound on one feed fetch
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// Upper bound on building one connector
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub build_timeout: Duration,

    /// How often retired generations are checked for disposal
    /// Default: 10s
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            schedule: None,
            interval: Duration::from_secs(300),
            run_on_start: true,
            fetch_timeout: Duration::from_secs(30),
            build_timeout: Duration::from_secs(5),
            sweep_interval: Duration::from_secs(10),
        }
    }
}
