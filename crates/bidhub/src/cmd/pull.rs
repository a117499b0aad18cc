//! Pull command - Fetch the supplier feed once
//!
//! Prints the decoded supplier set as a feed document. Useful to check what
//! the next refresh cycle would see.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bidhub_config::FeedLocation;
use bidhub_connectors::SupplierSource;
use bidhub_protocol::SupplierFeed;
use clap::Args;

use super::{FeedSource, load_config};

/// Pull command arguments
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Supplier backend base URL (overrides config)
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Local feed file (overrides config)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Bearer token for the feed
    #[arg(short, long)]
    token: Option<String>,

    /// Only print suppliers flagged active
    #[arg(long)]
    active_only: bool,
}

impl PullArgs {
    /// Location from the flags, if any was given
    fn location(&self) -> Option<FeedLocation> {
        match (&self.url, &self.file) {
            (Some(url), _) => Some(FeedLocation::Url(url.clone())),
            (None, Some(file)) => Some(FeedLocation::File(file.clone())),
            (None, None) => None,
        }
    }
}

/// Run the pull command
pub async fn run(args: PullArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(ref url) = args.url {
        bidhub_config::validate_url(url)?;
    }
    if args.token.is_some() {
        config.feed.token = args.token.clone();
    }
    let location = match args.location() {
        Some(location) => location,
        None => config.feed.location()?,
    };

    let source = FeedSource::from_location(location, &config.feed)?;
    tracing::info!(source = %source.describe(), "pulling supplier feed");

    let mut suppliers = source
        .fetch_suppliers()
        .await
        .with_context(|| format!("failed to fetch suppliers from {}", source.describe()))?;
    if args.active_only {
        suppliers = suppliers.active_only();
    }

    println!("{}", SupplierFeed::encode_pretty(&suppliers)?);
    tracing::info!(suppliers = suppliers.len(), "pull complete");
    Ok(())
}
