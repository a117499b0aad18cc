//! REST supplier feed
//!
//! Fetches the supplier document from the backend and decodes it. No retry
//! here: a failed fetch fails the cycle and the next scheduled trigger
//! tries again from scratch.

use bidhub_protocol::{SupplierFeed, SupplierSet};
use tracing::debug;

use crate::config::HttpFeedConfig;
use crate::error::ConnectorError;
use crate::traits::SupplierSource;

/// Supplier source backed by the REST feed
pub struct HttpSupplierSource {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpSupplierSource {
    /// Create a feed source
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails (e.g., TLS or proxy misconfiguration)
    pub fn new(config: HttpFeedConfig) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConnectorError::Init(format!("feed HTTP client: {}", e)))?;

        Ok(Self {
            url: config.url(),
            token: config.token,
            client,
        })
    }

    /// Feed URL this source reads
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build a request with optional auth
    fn build_request(&self) -> reqwest::RequestBuilder {
        let mut request = self.client.get(&self.url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Map a non-success response to an error
    fn error_for_status(&self, status: reqwest::StatusCode) -> ConnectorError {
        match status {
            reqwest::StatusCode::NOT_FOUND => ConnectorError::NotFound(self.url.clone()),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                ConnectorError::AuthFailed("feed rejected credentials".into())
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                ConnectorError::RateLimited { retry_after_secs: 60 }
            }
            other => ConnectorError::Status {
                status: other.as_u16(),
                url: self.url.clone(),
            },
        }
    }
}

impl SupplierSource for HttpSupplierSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_suppliers(&self) -> Result<SupplierSet, ConnectorError> {
        let response = self.build_request().send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.error_for_status(status));
        }

        let body = response.bytes().await?;
        let suppliers = SupplierFeed::decode(&body)?;

        debug!(
            url = %self.url,
            bytes = body.len(),
            suppliers = suppliers.len(),
            "supplier feed fetched"
        );
        Ok(suppliers)
    }
}
