//! Endpoint URL parsing
//!
//! One check shared by the feed URL in the configuration and the bid
//! endpoints in the feed itself.

use url::Url;

use crate::{ProtocolError, Result};

/// Parse an absolute http(s) URL with a non-empty host
///
/// # Errors
///
/// Returns `ProtocolError::InvalidEndpoint` for empty input, anything the
/// URL parser rejects (bad port, whitespace in the host, relative URLs), a
/// scheme other than http/https, or a missing host.
pub fn parse_http_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(ProtocolError::invalid_endpoint(raw, "empty endpoint"));
    }
    let url = Url::parse(raw).map_err(|e| ProtocolError::invalid_endpoint(raw, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProtocolError::invalid_endpoint(raw, "unsupported scheme"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ProtocolError::invalid_endpoint(raw, "missing host"));
    }
    Ok(url)
}
