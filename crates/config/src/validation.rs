//! Configuration validation
//!
//! Validates config consistency:
//! - At most one feed location
//! - Feed URL is an absolute http(s) URL
//! - Timeouts and intervals are non-zero
//! - Cron schedule parses

use std::str::FromStr;
use std::time::Duration;

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_feed(config)?;
    validate_refresh(config)?;
    validate_connector(config)?;
    Ok(())
}

fn validate_feed(config: &Config) -> Result<()> {
    let feed = &config.feed;
    if feed.url.is_some() && feed.file.is_some() {
        return Err(ConfigError::ConflictingFeed);
    }
    if let Some(ref url) = feed.url {
        validate_url(url)?;
    }
    if let Some(ref file) = feed.file
        && file.as_os_str().is_empty()
    {
        return Err(ConfigError::invalid_value("feed", "file", "path is empty"));
    }
    non_zero("feed", "timeout", feed.timeout)
}

/// Feed URL must be absolute http(s) with a host, same rule as bid endpoints
pub fn validate_url(url: &str) -> Result<()> {
    bidhub_protocol::parse_http_url(url)
        .map(|_| ())
        .map_err(|e| ConfigError::invalid_value("feed", "url", e.to_string()))
}

fn validate_refresh(config: &Config) -> Result<()> {
    let refresh = &config.refresh;
    if let Some(ref expr) = refresh.schedule {
        cron::Schedule::from_str(expr)
            .map_err(|e| ConfigError::invalid_value("refresh", "schedule", format!("'{expr}': {e}")))?;
    }
    non_zero("refresh", "interval", refresh.interval)?;
    non_zero("refresh", "fetch_timeout", refresh.fetch_timeout)?;
    non_zero("refresh", "build_timeout", refresh.build_timeout)?;
    non_zero("refresh", "sweep_interval", refresh.sweep_interval)
}

fn validate_connector(config: &Config) -> Result<()> {
    non_zero("connector", "timeout", config.connector.timeout)?;
    if let Some(ref ua) = config.connector.user_agent
        && ua.trim().is_empty()
    {
        return Err(ConfigError::invalid_value("connector", "user_agent", "must not be empty"));
    }
    Ok(())
}

fn non_zero(section: &'static str, field: &'static str, value: Duration) -> Result<()> {
    if value.is_zero() {
        return Err(ConfigError::invalid_value(section, field, "must be greater than zero"));
    }
    Ok(())
}
