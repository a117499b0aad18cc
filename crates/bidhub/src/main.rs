//! Bidhub - Supplier connector registry with scheduled hot refresh
//!
//! # Usage
//!
//! ```bash
//! # Keep connectors in step with the supplier feed (default)
//! bidhub
//! bidhub serve --config configs/example.toml
//!
//! # Fetch the feed once and print it
//! bidhub pull --url http://backend:9090
//! bidhub pull --file suppliers.json
//! ```

mod cmd;

use std::path::Path;

use anyhow::Result;
use bidhub_config::{Config, LogFormat};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Bidhub - supplier connector registry
#[derive(Parser, Debug)]
#[command(name = "bidhub")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the refresh scheduler until interrupted
    Serve,

    /// Fetch the supplier feed once and print it as JSON
    Pull(cmd::pull::PullArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (level, format) = resolve_logging(cli.log_level.as_deref(), cli.config.as_deref());
    init_logging(&level, format)?;

    match cli.command {
        Some(Command::Pull(args)) => cmd::pull::run(args, cli.config).await,
        // No subcommand = serve
        Some(Command::Serve) | None => cmd::serve::run(cli.config).await,
    }
}

/// Resolve log level and format: CLI flag > config file > default "info"
fn resolve_logging(cli_level: Option<&str>, config_path: Option<&Path>) -> (String, LogFormat) {
    let config = config_path
        .filter(|path| path.exists())
        .and_then(|path| Config::from_file(path).ok());

    let format = config.as_ref().map(|c| c.log.format).unwrap_or_default();
    let level = match (cli_level, &config) {
        (Some(level), _) => level.to_string(),
        (None, Some(config)) => config.log.level.as_str().to_string(),
        (None, None) => "info".to_string(),
    };
    (level, format)
}

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr so `pull` output stays clean on stdout.
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flag_wins() {
        let (level, format) = resolve_logging(Some("debug"), None);
        assert_eq!(level, "debug");
        assert_eq!(format, LogFormat::Console);
    }

    #[test]
    fn test_config_level_and_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[log]\nlevel = \"warn\"\nformat = \"json\"").unwrap();

        let (level, format) = resolve_logging(None, Some(file.path()));
        assert_eq!(level, "warn");
        assert_eq!(format, LogFormat::Json);

        let (level, _) = resolve_logging(Some("trace"), Some(file.path()));
        assert_eq!(level, "trace");
    }

    #[test]
    fn test_default_info() {
        let (level, _) = resolve_logging(None, Some(Path::new("/nonexistent/bidhub.toml")));
        assert_eq!(level, "info");
    }

    #[test]
    fn test_cli_parses_pull() {
        let cli = Cli::try_parse_from(["bidhub", "pull", "--url", "http://backend:9090"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Pull(_))));

        let cli = Cli::try_parse_from(["bidhub", "--log-level", "debug"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
