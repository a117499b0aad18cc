//! OpenRTB outbound connector
//!
//! One connector per supplier, each owning an HTTP client bound to the
//! supplier's endpoint and content settings. Retiring a connector closes
//! it; the client's connection pool is released when the owning
//! generation is dropped.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use bidhub_protocol::{ProtocolError, SupplierDefinition, SupplierId};
use bidhub_registry::Retire;
use bytes::Bytes;
use reqwest::Url;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use tracing::debug;

use crate::OPENRTB_VERSION_HEADER;
use crate::config::OpenRtbConfig;
use crate::error::ConnectorError;
use crate::traits::ConnectorFactory;

/// Raw bid response from a supplier
#[derive(Debug, Clone)]
pub struct BidResponse {
    /// HTTP status (204 means no bid)
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl BidResponse {
    /// Check if the supplier declined to bid
    pub fn is_no_bid(&self) -> bool {
        self.status == 204 || self.body.is_empty()
    }
}

/// Live connector bound to one supplier endpoint
#[derive(Debug)]
pub struct OpenRtbConnector {
    supplier: SupplierDefinition,
    endpoint: Url,
    client: reqwest::Client,
    closed: AtomicBool,
    /// Bid requests sent through this connector
    requests: AtomicU64,
}

impl OpenRtbConnector {
    /// Supplier definition this connector was built from
    pub fn supplier(&self) -> &SupplierDefinition {
        &self.supplier
    }

    /// Supplier id
    pub fn supplier_id(&self) -> SupplierId {
        self.supplier.supplier_id
    }

    /// Parsed endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Check if the connector was retired
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of bid requests sent
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Post one bid request to the supplier
    ///
    /// # Errors
    ///
    /// - `Closed` if the connector was retired
    /// - `Http` on transport failure or timeout
    pub async fn send(&self, body: Bytes) -> Result<BidResponse, ConnectorError> {
        if self.is_closed() {
            return Err(ConnectorError::Closed(self.supplier.supplier_id));
        }
        self.requests.fetch_add(1, Ordering::Relaxed);

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(OPENRTB_VERSION_HEADER, &self.supplier.open_rtb_version)
            .header(CONTENT_TYPE, &self.supplier.content_type)
            .body(body);

        if let Some(ref encoding) = self.supplier.accept_encoding {
            request = request.header(ACCEPT_ENCODING, encoding);
        }
        if let Some(ref encoding) = self.supplier.content_encoding {
            request = request.header(CONTENT_ENCODING, encoding);
        }
        if let Some(tmax) = self.supplier.tmax_ms {
            request = request.timeout(Duration::from_millis(u64::from(tmax)));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(BidResponse { status, body })
    }
}

impl Retire for OpenRtbConnector {
    fn retire(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(
                supplier = %self.supplier.supplier_id,
                requests = self.request_count(),
                "connector closed"
            );
        }
    }
}

/// Factory building `OpenRtbConnector`s
#[derive(Debug, Clone, Default)]
pub struct OpenRtbConnectorFactory {
    config: OpenRtbConfig,
}

impl OpenRtbConnectorFactory {
    /// Create a factory with the given connector settings
    pub fn new(config: OpenRtbConfig) -> Self {
        Self { config }
    }

    /// Validate a supplier endpoint
    ///
    /// Must be an absolute http(s) URL with a host.
    pub fn parse_endpoint(supplier: &SupplierDefinition) -> Result<Url, ConnectorError> {
        bidhub_protocol::parse_http_url(&supplier.endpoint).map_err(|e| match e {
            ProtocolError::InvalidEndpoint { reason, .. } => {
                ConnectorError::invalid_endpoint(supplier.supplier_id, &supplier.endpoint, reason)
            }
            other => ConnectorError::invalid_endpoint(supplier.supplier_id, &supplier.endpoint, other.to_string()),
        })
    }
}

impl ConnectorFactory for OpenRtbConnectorFactory {
    type Connector = OpenRtbConnector;

    async fn build(&self, supplier: &SupplierDefinition) -> Result<OpenRtbConnector, ConnectorError> {
        let endpoint = Self::parse_endpoint(supplier)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .timeout(self.config.timeout)
            .pool_idle_timeout(self.config.pool_idle_timeout);
        if !supplier.connection_keep_alive {
            builder = builder.pool_max_idle_per_host(0);
        }
        let client = builder.build().map_err(|e| {
            ConnectorError::Init(format!("{} HTTP client: {}", supplier.supplier_id, e))
        })?;

        Ok(OpenRtbConnector {
            supplier: supplier.clone(),
            endpoint,
            client,
            closed: AtomicBool::new(false),
            requests: AtomicU64::new(0),
        })
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
