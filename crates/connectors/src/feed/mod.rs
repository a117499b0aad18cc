//! Supplier feed sources

mod http;
mod static_source;

pub use http::HttpSupplierSource;
pub use static_source::StaticSupplierSource;
