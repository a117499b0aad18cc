//! Static supplier sources
//!
//! A fixed in-memory set, or a local file in the feed's JSON format.

use std::path::PathBuf;

use bidhub_protocol::{SupplierFeed, SupplierSet};

use crate::error::ConnectorError;
use crate::traits::SupplierSource;

/// Supplier source that never touches the network
#[derive(Debug, Clone)]
pub enum StaticSupplierSource {
    /// Always returns the same set
    Fixed(SupplierSet),
    /// Re-reads a feed document from disk on every fetch
    File(PathBuf),
}

impl StaticSupplierSource {
    /// Source returning a fixed set
    pub fn fixed(suppliers: SupplierSet) -> Self {
        Self::Fixed(suppliers)
    }

    /// Source reading a feed file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

impl SupplierSource for StaticSupplierSource {
    fn describe(&self) -> String {
        match self {
            Self::Fixed(set) => format!("static({} suppliers)", set.len()),
            Self::File(path) => format!("file://{}", path.display()),
        }
    }

    async fn fetch_suppliers(&self) -> Result<SupplierSet, ConnectorError> {
        match self {
            Self::Fixed(set) => Ok(set.clone()),
            Self::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| ConnectorError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
                Ok(SupplierFeed::decode(&bytes)?)
            }
        }
    }
}
