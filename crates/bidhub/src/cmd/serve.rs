//! Serve command - Keep the connector registry in step with the feed
//!
//! Composition root: owns the registry and hands it to the coordinator. The
//! read path would take another clone of the same `Arc`.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use bidhub_config::Config;
use bidhub_connectors::{OpenRtbConfig, OpenRtbConnectorFactory, SupplierSource};
use bidhub_refresh::{RefreshConfig, RefreshCoordinator, RefreshScheduler, Trigger};
use bidhub_registry::ConnectorRegistry;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::{FeedSource, load_config};

/// Run the serve command
pub async fn run(config_path: Option<PathBuf>) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        config = %config_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "(default)".into()),
        "bidhub starting"
    );

    let config = load_config(config_path)?;

    if let Err(e) = run_server(config).await {
        error!(error = %e, "server error");
        return Err(e);
    }

    info!("bidhub shutdown complete");
    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();

    let location = config.feed.location()?;
    let source = FeedSource::from_location(location, &config.feed)?;
    let factory = OpenRtbConnectorFactory::new(connector_settings(&config));
    let trigger = build_trigger(&config)?;

    let registry = Arc::new(ConnectorRegistry::new());
    info!(source = %source.describe(), trigger = ?trigger, "refresh configured");

    let coordinator = Arc::new(RefreshCoordinator::new(
        source,
        factory,
        Arc::clone(&registry),
        cycle_settings(&config),
    ));
    let scheduler = RefreshScheduler::new(Arc::clone(&coordinator), trigger)
        .with_run_on_start(config.refresh.run_on_start)
        .with_sweep_interval(config.refresh.sweep_interval);

    let scheduler_task = tokio::spawn(scheduler.run(cancel.clone()));

    wait_for_shutdown().await?;
    info!("shutdown signal received, stopping refresh...");

    cancel.cancel();
    if let Err(e) = scheduler_task.await {
        error!(error = %e, "refresh scheduler task failed");
    }

    let metrics = coordinator.metrics();
    info!(
        active_seq = ?registry.active_seq(),
        cycles = metrics.cycles.load(Ordering::Relaxed),
        published = metrics.published.load(Ordering::Relaxed),
        abandoned = metrics.abandoned.load(Ordering::Relaxed),
        skipped = metrics.skipped.load(Ordering::Relaxed),
        "refresh stopped"
    );

    let disposed = registry.drain();
    info!(disposed, pending = registry.retired_count(), "connector registry drained");
    Ok(())
}

/// Cron schedule if configured, otherwise the fixed interval
fn build_trigger(config: &Config) -> Result<Trigger> {
    match config.refresh.schedule {
        Some(ref expr) => Trigger::cron(expr).context("failed to parse refresh schedule"),
        None => Ok(Trigger::every(config.refresh.interval)),
    }
}

fn cycle_settings(config: &Config) -> RefreshConfig {
    RefreshConfig {
        fetch_timeout: config.refresh.fetch_timeout,
        build_timeout: config.refresh.build_timeout,
    }
}

fn connector_settings(config: &Config) -> OpenRtbConfig {
    let mut settings = OpenRtbConfig {
        timeout: config.connector.timeout,
        pool_idle_timeout: config.connector.pool_idle_timeout,
        ..OpenRtbConfig::default()
    };
    if let Some(ref ua) = config.connector.user_agent {
        settings.user_agent = ua.clone();
    }
    settings
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("failed to install SIGTERM handler")?;
        tokio::select! {
            result = signal::ctrl_c() => result.context("failed to listen for Ctrl+C")?,
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    signal::ctrl_c().await.context("failed to listen for Ctrl+C")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn test_interval_trigger_by_default() {
        let config = Config::from_str("[refresh]\ninterval = \"2m\"").unwrap();
        match build_trigger(&config).unwrap() {
            Trigger::Interval(period) => assert_eq!(period, Duration::from_secs(120)),
            other => panic!("expected interval trigger, got {other:?}"),
        }
    }

    #[test]
    fn test_cron_trigger_when_scheduled() {
        let config = Config::from_str("[refresh]\nschedule = \"0 0 * * * *\"").unwrap();
        assert!(matches!(build_trigger(&config).unwrap(), Trigger::Cron(_)));
    }

    #[test]
    fn test_settings_mapping() {
        let toml = r#"
[refresh]
fetch_timeout = "12s"
build_timeout = "3s"

[connector]
timeout = "400ms"
user_agent = "edge/9"
"#;
        let config = Config::from_str(toml).unwrap();

        let cycle = cycle_settings(&config);
        assert_eq!(cycle.fetch_timeout, Duration::from_secs(12));
        assert_eq!(cycle.build_timeout, Duration::from_secs(3));

        let connector = connector_settings(&config);
        assert_eq!(connector.timeout, Duration::from_millis(400));
        assert_eq!(connector.user_agent, "edge/9");
    }

    #[tokio::test]
    async fn test_serve_without_feed_fails() {
        let err = run_server(Config::default()).await.unwrap_err();
        assert!(err.to_string().contains("no supplier feed configured"));
    }
}
