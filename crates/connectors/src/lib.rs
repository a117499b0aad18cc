//! Bidhub - Connectors
//!
//! The two collaborators of a refresh cycle and their concrete
//! implementations:
//!
//! - `SupplierSource` fetches the current supplier set from the feed
//! - `ConnectorFactory` binds one outbound connector to one supplier
//!
//! # Available Implementations
//!
//! - **HttpSupplierSource** - REST supplier feed (`<base>/core/supplier`)
//! - **StaticSupplierSource** - Fixed set or local feed file
//! - **OpenRtbConnectorFactory** - HTTP bid connector per supplier endpoint
//!
//! # Design Principles
//!
//! - **Complete or nothing**: a source returns the whole set or an error
//! - **Independent builds**: one supplier's build never affects another's
//! - **Static dispatch**: traits return `impl Future + Send`, no boxing
//!
//! # Example
//!
//! ```ignore
//! use bidhub_connectors::{HttpFeedConfig, HttpSupplierSource, SupplierSource};
//!
//! let source = HttpSupplierSource::new(HttpFeedConfig {
//!     base_url: "http://backend:9090".into(),
//!     ..Default::default()
//! })?;
//!
//! let suppliers = source.fetch_suppliers().await?;
//! ```

pub mod config;
mod error;
mod feed;
mod openrtb;
mod traits;

// Re-exports
pub use config::{HttpFeedConfig, OpenRtbConfig};
pub use error::ConnectorError;
pub use feed::{HttpSupplierSource, StaticSupplierSource};
pub use openrtb::{BidResponse, OpenRtbConnector, OpenRtbConnectorFactory};
pub use traits::{ConnectorFactory, SupplierSource};

/// HTTP header carrying the OpenRTB protocol version
pub const OPENRTB_VERSION_HEADER: &str = "x-openrtb-version";
