//! Bidhub Protocol - Supplier feed types
//!
//! This crate provides the types that describe demand partners as they
//! arrive from the supplier feed:
//! - `SupplierId` - Copy identifier used as the registry key on the hot path
//! - `SupplierDefinition` - Immutable description of one supplier endpoint
//! - `SupplierSet` - Ordered result of one feed fetch
//! - `SupplierFeed` - JSON wire envelope (`{ "data": [...] }`)
//! - `parse_http_url` - Endpoint check shared by config and connectors
//!
//! # Design Principles
//!
//! - **Immutable once fetched**: definitions are never edited after decode
//! - **Copy keys**: lookups hash a `u64`, no string work per bid request
//! - **Explicit empty state**: an empty set decodes fine and is rejected later

mod endpoint;
mod error;
mod feed;
mod supplier;
mod supplier_id;
mod supplier_set;

pub use endpoint::parse_http_url;
pub use error::ProtocolError;
pub use feed::SupplierFeed;
pub use supplier::SupplierDefinition;
pub use supplier_id::SupplierId;
pub use supplier_set::SupplierSet;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Default OpenRTB version announced to suppliers
pub const DEFAULT_OPENRTB_VERSION: &str = "2.5";

/// Default content type for bid requests
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Default bid currency
pub const DEFAULT_CURRENCY: &str = "USD";

#[cfg(test)]
mod feed_test;
