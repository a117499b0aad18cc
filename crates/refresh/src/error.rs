//! Refresh cycle errors
//!
//! Every variant is contained on the writer side: a failed cycle leaves the
//! active generation in place and the read path never sees the error.

use std::time::Duration;

use bidhub_connectors::ConnectorError;
use bidhub_protocol::SupplierId;
use bidhub_registry::RegistryError;
use thiserror::Error;

/// Reasons a refresh cycle was abandoned
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Feed transport or decode failure
    #[error("supplier fetch from {source_name} failed: {error}")]
    Fetch {
        /// Feed description
        source_name: String,
        #[source]
        error: ConnectorError,
    },

    /// Feed did not answer within the fetch timeout
    #[error("supplier fetch from {source_name} timed out after {timeout:?}")]
    FetchTimedOut {
        /// Feed description
        source_name: String,
        /// Configured fetch timeout
        timeout: Duration,
    },

    /// Feed returned no usable suppliers
    #[error("supplier feed returned no usable suppliers ({fetched} fetched)")]
    EmptyFeed {
        /// Suppliers in the payload, including inactive ones
        fetched: usize,
    },

    /// Feed lists the same supplier twice
    #[error("supplier feed lists {supplier_id} more than once")]
    MalformedFeed {
        /// The repeated supplier
        supplier_id: SupplierId,
    },

    /// Every connector build failed
    #[error("all {attempted} connector builds failed")]
    AllBuildsFailed {
        /// Suppliers attempted
        attempted: usize,
    },

    /// Registry refused to stage or publish
    #[error("publish failed: {0}")]
    Publish(#[from] RegistryError),
}

impl RefreshError {
    /// Check if this error means the single-writer discipline was broken
    ///
    /// Every other variant is an expected, recoverable condition.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Publish(_))
    }

    /// Check if the cycle failed before anything was staged
    pub fn is_fetch_side(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::FetchTimedOut { .. } | Self::EmptyFeed { .. } | Self::MalformedFeed { .. }
        )
    }
}
