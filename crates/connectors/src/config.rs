//! Runtime settings for the concrete collaborators
//!
//! These are plain structs with defaults; the binary fills them from the
//! TOML configuration.

use std::time::Duration;

/// Default feed request timeout
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// Default outbound bid request timeout
pub const DEFAULT_BID_TIMEOUT: Duration = Duration::from_millis(250);

/// Default user agent for all outbound HTTP
pub const DEFAULT_USER_AGENT: &str = concat!("bidhub/", env!("CARGO_PKG_VERSION"));

/// Supplier feed endpoint settings
#[derive(Debug, Clone)]
pub struct HttpFeedConfig {
    /// Base URL of the supplier backend (e.g. `http://backend:9090`)
    pub base_url: String,

    /// Path segments appended to the base URL
    pub path: Vec<String>,

    /// Bearer token (optional)
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// User agent header
    pub user_agent: String,
}

impl Default for HttpFeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9090".to_string(),
            path: vec!["core".to_string(), "supplier".to_string()],
            token: None,
            timeout: DEFAULT_FEED_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpFeedConfig {
    /// Full feed URL: base URL joined with the path segments
    pub fn url(&self) -> String {
        let mut url = self.base_url.trim_end_matches('/').to_string();
        for segment in &self.path {
            let segment = segment.trim_matches('/');
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }
        url
    }
}

/// Outbound OpenRTB connector settings
#[derive(Debug, Clone)]
pub struct OpenRtbConfig {
    /// Bid request timeout (a supplier's `tmax` overrides it per request)
    pub timeout: Duration,

    /// How long idle pooled connections are kept
    pub pool_idle_timeout: Duration,

    /// User agent header
    pub user_agent: String,
}

impl Default for OpenRtbConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_BID_TIMEOUT,
            pool_idle_timeout: Duration::from_secs(90),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
