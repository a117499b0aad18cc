//! Bidhub Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use bidhub_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[feed]\nurl = \"http://backend:9090\"").unwrap();
//! assert!(config.feed.location().is_ok());
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [feed]
//! url = "http://backend:9090"
//! ```
//!
//! # Example Full Config
//!
//! See `configs/example.toml` for all available options.

mod connector;
mod error;
mod feed;
mod logging;
mod refresh;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use connector::ConnectorConfig;
pub use error::{ConfigError, Result};
pub use feed::{FeedConfig, FeedLocation};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use refresh::RefreshConfig;
pub use validation::validate_url;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Supplier feed location and credentials
    pub feed: FeedConfig,

    /// Refresh schedule and cycle timeouts
    pub refresh: RefreshConfig,

    /// Outbound connector settings
    pub connector: ConnectorConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.feed.url.is_none());
        assert_eq!(config.refresh.interval, Duration::from_secs(300));
        assert_eq!(config.connector.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
level = "debug"
format = "json"

[feed]
url = "http://backend:9090"
token = "s3cret"
timeout = "5s"

[refresh]
schedule = "0 */5 * * * *"
run_on_start = false
fetch_timeout = "20s"
build_timeout = "2s"
sweep_interval = "30s"

[connector]
timeout = "300ms"
pool_idle_timeout = "60s"
user_agent = "bidhub-edge/1.0"
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(
            config.feed.location().unwrap(),
            FeedLocation::Url("http://backend:9090".into())
        );
        assert_eq!(config.feed.token.as_deref(), Some("s3cret"));
        assert_eq!(config.feed.timeout, Duration::from_secs(5));
        assert_eq!(config.refresh.schedule.as_deref(), Some("0 */5 * * * *"));
        assert!(!config.refresh.run_on_start);
        assert_eq!(config.refresh.sweep_interval, Duration::from_secs(30));
        assert_eq!(config.connector.timeout, Duration::from_millis(300));
        assert_eq!(config.connector.user_agent.as_deref(), Some("bidhub-edge/1.0"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\nfile = \"suppliers.json\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(matches!(config.feed.location().unwrap(), FeedLocation::File(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/bidhub.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
