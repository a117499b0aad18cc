//! Connector lease returned by lookups

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use bidhub_protocol::SupplierId;

use crate::{Generation, Retire};

/// A connector borrowed from the generation that was active at lookup time
///
/// The lease holds a reference count on its generation. As long as any
/// lease is alive the generation cannot be disposed, so a request that
/// started before a swap finishes on the connector it resolved.
pub struct ConnectorLease<C: Retire> {
    generation: Arc<Generation<C>>,
    slot: usize,
}

impl<C: Retire> ConnectorLease<C> {
    #[inline]
    pub(crate) fn new(generation: Arc<Generation<C>>, slot: usize) -> Self {
        Self { generation, slot }
    }

    /// Supplier this connector is bound to
    #[inline]
    pub fn supplier_id(&self) -> SupplierId {
        *self.generation.at(self.slot).0
    }

    /// Sequence of the generation the connector belongs to
    #[inline]
    pub fn generation_seq(&self) -> u64 {
        self.generation.seq()
    }
}

impl<C: Retire> Deref for ConnectorLease<C> {
    type Target = C;

    #[inline]
    fn deref(&self) -> &C {
        self.generation.at(self.slot).1
    }
}

impl<C: Retire> fmt::Debug for ConnectorLease<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorLease")
            .field("supplier", &self.supplier_id())
            .field("generation", &self.generation_seq())
            .finish()
    }
}
