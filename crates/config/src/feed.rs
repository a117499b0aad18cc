//! Supplier feed configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Where suppliers are fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    /// Supplier backend base URL
    Url(String),
    /// Local feed document
    File(PathBuf),
}

/// Supplier feed configuration
///
/// # Example
///
/// ```toml
/// [feed]
/// url = "http://backend:9090"
/// token = "secret"
/// timeout = "10s"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the supplier backend; `/core/supplier` is appended
    pub url: Option<String>,

    /// Local feed file, used instead of `url`
    pub file: Option<PathBuf>,

    /// Bearer token sent with feed requests
    pub token: Option<String>,

    /// Feed request timeout
    /// Default: 10s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl FeedConfig {
    /// Resolve the configured feed location
    ///
    /// # Errors
    ///
    /// `MissingFeed` if neither `url` nor `file` is set.
    pub fn location(&self) -> Result<FeedLocation> {
        match (&self.url, &self.file) {
            (Some(url), None) => Ok(FeedLocation::Url(url.clone())),
            (None, Some(file)) => Ok(FeedLocation::File(file.clone())),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingFeed),
            (None, None) => Err(ConfigError::MissingFeed),
        }
    }
}
