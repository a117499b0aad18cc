//! Outbound connector configuration

use serde::Deserialize;
use std::time::Duration;

/// Settings shared by every OpenRTB connector
///
/// # Example
///
/// ```toml
/// [connector]
/// timeout = "250ms"
/// pool_idle_timeout = "90s"
/// user_agent = "bidhub/0.1"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Bid request timeout
    /// Default: 250ms
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// How long idle pooled connections are kept
    /// Default: 90s
    #[serde(with = "humantime_serde")]
    pub pool_idle_timeout: Duration,

    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(250),
            pool_idle_timeout: Duration::from_secs(90),
            user_agent: None,
        }
    }
}
