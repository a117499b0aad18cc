//! Command implementations for the bidhub CLI

pub mod pull;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bidhub_config::{Config, FeedConfig, FeedLocation};
use bidhub_connectors::{
    ConnectorError, HttpFeedConfig, HttpSupplierSource, StaticSupplierSource, SupplierSource,
};
use bidhub_protocol::SupplierSet;
use tracing::info;

/// Feed source chosen at runtime, without dyn
pub enum FeedSource {
    Http(HttpSupplierSource),
    Static(StaticSupplierSource),
}

impl FeedSource {
    /// Build the source for a feed location
    pub fn from_location(location: FeedLocation, feed: &FeedConfig) -> Result<Self> {
        match location {
            FeedLocation::Url(base_url) => {
                let config = HttpFeedConfig {
                    base_url,
                    token: feed.token.clone(),
                    timeout: feed.timeout,
                    ..HttpFeedConfig::default()
                };
                let source = HttpSupplierSource::new(config).context("failed to create feed client")?;
                Ok(Self::Http(source))
            }
            FeedLocation::File(path) => Ok(Self::Static(StaticSupplierSource::file(path))),
        }
    }
}

impl SupplierSource for FeedSource {
    fn describe(&self) -> String {
        match self {
            Self::Http(s) => s.describe(),
            Self::Static(s) => s.describe(),
        }
    }

    async fn fetch_suppliers(&self) -> Result<SupplierSet, ConnectorError> {
        match self {
            Self::Http(s) => s.fetch_suppliers().await,
            Self::Static(s) => s.fetch_suppliers().await,
        }
    }
}

/// Load configuration
///
/// An explicit path must exist. Without one, the default paths are tried
/// and a missing file falls back to defaults.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::from_file(&path).context("failed to load configuration")
        }
        None => {
            let default_paths = [PathBuf::from("configs/config.toml"), PathBuf::from("bidhub.toml")];
            for path in &default_paths {
                if path.exists() {
                    info!(config = %path.display(), "using config file");
                    return Config::from_file(path).context("failed to load configuration");
                }
            }
            info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}
