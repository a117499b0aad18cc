//! Immutable connector generation
//!
//! A generation is one complete snapshot of the connector table, built from
//! one supplier set. Once published it is never mutated, only replaced.
//! Dropping the last reference retires its connectors, so a generation that
//! outlives the registry is still cleaned up when its final lease goes away.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use bidhub_protocol::SupplierId;

use crate::Retire;

/// One immutable snapshot of supplier → connector mappings
///
/// Connectors live in a dense `Vec` and the map only stores slot indices,
/// so a `ConnectorLease` can point at its connector with a plain `usize`.
#[derive(Debug)]
pub struct Generation<C: Retire> {
    /// Monotonic sequence number (first published generation is 1)
    seq: u64,

    /// Connectors in insertion order
    connectors: Vec<C>,

    /// Supplier id of each slot (parallel to `connectors`)
    ids: Vec<SupplierId>,

    /// Supplier id → slot
    index: HashMap<SupplierId, usize>,

    /// Set once the connectors have been retired
    retired: AtomicBool,
}

impl<C: Retire> Generation<C> {
    /// Create an empty generation with the given sequence
    pub(crate) fn with_capacity(seq: u64, capacity: usize) -> Self {
        Self {
            seq,
            connectors: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            retired: AtomicBool::new(false),
        }
    }

    /// Insert a connector; returns it back if the id is already present
    pub(crate) fn insert(&mut self, id: SupplierId, connector: C) -> Result<(), C> {
        if self.index.contains_key(&id) {
            return Err(connector);
        }
        self.index.insert(id, self.connectors.len());
        self.ids.push(id);
        self.connectors.push(connector);
        Ok(())
    }

    /// Slot of a supplier's connector
    #[inline]
    pub(crate) fn slot(&self, id: &SupplierId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Connector at a slot handed out by `slot()`
    #[inline]
    pub(crate) fn at(&self, slot: usize) -> (&SupplierId, &C) {
        (&self.ids[slot], &self.connectors[slot])
    }

    /// Sequence number of this generation
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Get a supplier's connector
    #[inline]
    pub fn get(&self, id: &SupplierId) -> Option<&C> {
        self.slot(id).map(|slot| &self.connectors[slot])
    }

    /// Check if a supplier is present
    #[inline]
    pub fn contains(&self, id: &SupplierId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of connectors
    #[inline]
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Check if the generation holds no connectors
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Supplier ids in insertion order
    pub fn supplier_ids(&self) -> &[SupplierId] {
        &self.ids
    }

    /// Iterate over (supplier, connector) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (SupplierId, &C)> {
        self.ids.iter().copied().zip(self.connectors.iter())
    }

    /// Retire every connector in this generation, once
    pub(crate) fn retire_all(&self) {
        if self.retired.swap(true, Ordering::AcqRel) {
            return;
        }
        for connector in &self.connectors {
            connector.retire();
        }
    }
}

impl<C: Retire> Drop for Generation<C> {
    fn drop(&mut self) {
        self.retire_all();
    }
}
