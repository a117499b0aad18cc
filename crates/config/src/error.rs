//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Neither a feed URL nor a feed file is configured
    #[error("no supplier feed configured - set [feed].url or [feed].file")]
    MissingFeed,

    /// Both a feed URL and a feed file are configured
    #[error("[feed] sets both url and file - choose one")]
    ConflictingFeed,

    /// Validation error - invalid value
    #[error("[{section}] has invalid {field}: {message}")]
    InvalidValue {
        /// Config section
        section: &'static str,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an InvalidValue error
    pub fn invalid_value(
        section: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section,
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = ConfigError::IoError {
            path: "/etc/bidhub.toml".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/etc/bidhub.toml"));
    }

    #[test]
    fn test_missing_feed() {
        let err = ConfigError::MissingFeed;
        assert!(err.to_string().contains("[feed].url"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("refresh", "interval", "must be greater than zero");
        assert!(err.to_string().contains("[refresh]"));
        assert!(err.to_string().contains("interval"));
        assert!(err.to_string().contains("greater than zero"));
    }
}
