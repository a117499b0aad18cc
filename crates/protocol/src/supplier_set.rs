//! Supplier set
//!
//! The ordered result of one successful feed fetch.

use crate::{SupplierDefinition, SupplierId};

/// Ordered collection of supplier definitions from one fetch
///
/// May be empty. An empty set is a valid decode result, but callers treat
/// it as "no data" and never publish it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierSet {
    suppliers: Vec<SupplierDefinition>,
}

impl SupplierSet {
    /// Create a set from feed-ordered definitions
    #[inline]
    #[must_use]
    pub fn new(suppliers: Vec<SupplierDefinition>) -> Self {
        Self { suppliers }
    }

    /// Number of suppliers in the set
    #[inline]
    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    /// Check if the fetch returned no suppliers
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Iterate in feed order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SupplierDefinition> {
        self.suppliers.iter()
    }

    /// Supplier ids in feed order
    pub fn ids(&self) -> impl Iterator<Item = SupplierId> + '_ {
        self.suppliers.iter().map(|s| s.supplier_id)
    }

    /// Keep only suppliers flagged active
    #[must_use]
    pub fn active_only(self) -> Self {
        Self {
            suppliers: self.suppliers.into_iter().filter(|s| s.active).collect(),
        }
    }

    /// Borrow the definitions as a slice
    #[inline]
    pub fn as_slice(&self) -> &[SupplierDefinition] {
        &self.suppliers
    }
}

impl FromIterator<SupplierDefinition> for SupplierSet {
    fn from_iter<I: IntoIterator<Item = SupplierDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for SupplierSet {
    type Item = SupplierDefinition;
    type IntoIter = std::vec::IntoIter<SupplierDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.suppliers.into_iter()
    }
}

impl<'a> IntoIterator for &'a SupplierSet {
    type Item = &'a SupplierDefinition;
    type IntoIter = std::slice::Iter<'a, SupplierDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.suppliers.iter()
    }
}
