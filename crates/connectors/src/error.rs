//! Error types for connectors

use bidhub_protocol::{ProtocolError, SupplierId};
use thiserror::Error;

/// Errors that can occur while fetching suppliers or using connectors
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Failed to initialize a client (e.g., TLS or proxy misconfiguration)
    #[error("failed to initialize connector: {0}")]
    Init(String),

    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed payload could not be decoded
    #[error("feed decode error: {0}")]
    Decode(#[from] ProtocolError),

    /// Server answered with an unexpected status
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Authentication failed
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Resource not found
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the feed backend
    #[error("rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// Supplier endpoint is unusable
    #[error("{supplier_id} has invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        supplier_id: SupplierId,
        endpoint: String,
        reason: String,
    },

    /// Connector was retired with its generation
    #[error("connector for {0} is closed")]
    Closed(SupplierId),

    /// Local feed file could not be read
    #[error("failed to read feed file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ConnectorError {
    /// Create an InvalidEndpoint error
    pub fn invalid_endpoint(
        supplier_id: SupplierId,
        endpoint: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEndpoint {
            supplier_id,
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a payload decode failure (as opposed to transport)
    pub fn is_decode(&self) -> bool {
        match self {
            Self::Decode(_) => true,
            Self::Http(e) => e.is_decode(),
            _ => false,
        }
    }
}
