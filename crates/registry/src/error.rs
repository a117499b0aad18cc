//! Registry error types

use bidhub_protocol::SupplierId;
use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by the staging side of the registry
///
/// None of these can reach the read path: `lookup()` is infallible.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A staging generation is already being built
    #[error("staging generation {seq} is already in progress")]
    AlreadyStaging {
        /// Sequence of the staging generation in flight
        seq: u64,
    },

    /// Same supplier added twice to one staging generation
    #[error("{supplier_id} was already added to staging generation {seq}")]
    DuplicateSupplier {
        /// The repeated supplier
        supplier_id: SupplierId,
        /// Staging generation sequence
        seq: u64,
    },

    /// Staging handle was discarded before publish
    #[error("staging generation {seq} was discarded")]
    Aborted {
        /// Sequence of the discarded generation
        seq: u64,
    },
}

impl RegistryError {
    /// Create an AlreadyStaging error
    #[inline]
    pub fn already_staging(seq: u64) -> Self {
        Self::AlreadyStaging { seq }
    }

    /// Create a DuplicateSupplier error
    #[inline]
    pub fn duplicate_supplier(supplier_id: SupplierId, seq: u64) -> Self {
        Self::DuplicateSupplier { supplier_id, seq }
    }

    /// Create an Aborted error
    #[inline]
    pub fn aborted(seq: u64) -> Self {
        Self::Aborted { seq }
    }
}
