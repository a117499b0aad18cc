//! Supplier identifier type
//!
//! `SupplierId` is a lightweight, Copy identifier for demand partners.
//! It is the key of every connector lookup on the bid path.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supplier identifier
///
/// Numeric identity assigned by the supplier backend. `Copy` and the size
/// of a register, so hashing it on every bid request costs nothing.
///
/// # Example
///
/// ```
/// use bidhub_protocol::SupplierId;
///
/// let supplier = SupplierId::new(42);
/// let copy = supplier;  // Copy, not move
/// assert_eq!(supplier, copy);
/// assert_eq!(supplier.to_string(), "supplier:42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(u64);

impl SupplierId {
    /// Create a new supplier ID
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value of this ID
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "supplier:{}", self.0)
    }
}

impl From<u64> for SupplierId {
    #[inline]
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<SupplierId> for u64 {
    #[inline]
    fn from(id: SupplierId) -> Self {
        id.0
    }
}
