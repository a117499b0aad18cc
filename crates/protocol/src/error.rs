//! Protocol error types
//!
//! Errors that can occur when decoding the supplier feed or reading the
//! endpoints it carries.

use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload is not a valid supplier feed document
    #[error("invalid supplier feed: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint is not an absolute http(s) URL with a host
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl ProtocolError {
    /// Create an invalid endpoint error
    #[inline]
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint_error() {
        let err = ProtocolError::invalid_endpoint("ftp://dsp", "unsupported scheme");
        assert!(err.to_string().contains("'ftp://dsp'"));
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_decode_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ProtocolError::from(json_err);
        assert!(err.to_string().contains("invalid supplier feed"));
    }
}
