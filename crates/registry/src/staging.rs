//! Staging side of the registry
//!
//! A `StagingHandle` owns the generation under construction. Nothing in it
//! is reachable from readers until `ConnectorRegistry::switch_generation`
//! moves it into the active slot.

use std::sync::Arc;

use bidhub_protocol::SupplierId;
use parking_lot::Mutex;

use crate::error::{RegistryError, Result};
use crate::{Generation, RegistryMetrics, Retire};

/// Identity of the staging generation currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StagingTicket {
    pub(crate) id: u64,
    pub(crate) seq: u64,
}

/// Writer-side slot recording which staging handle may publish
pub(crate) type StagingSlot = Arc<Mutex<Option<StagingTicket>>>;

/// Exclusive handle on a generation being built
///
/// Dropping the handle without publishing discards the staged generation:
/// its connectors are retired and the staging slot is released, so a
/// cancelled refresh never blocks the next one. Either way of discarding
/// counts as one abort.
pub struct StagingHandle<C: Retire> {
    ticket: StagingTicket,
    slot: StagingSlot,
    metrics: Arc<RegistryMetrics>,
    /// `None` once published or discarded
    generation: Option<Generation<C>>,
}

impl<C: Retire> StagingHandle<C> {
    pub(crate) fn new(ticket: StagingTicket, slot: StagingSlot, metrics: Arc<RegistryMetrics>) -> Self {
        Self {
            ticket,
            slot,
            metrics,
            generation: Some(Generation::with_capacity(ticket.seq, 16)),
        }
    }

    /// Sequence the generation will carry once published
    #[inline]
    pub fn seq(&self) -> u64 {
        self.ticket.seq
    }

    /// Number of connectors staged so far
    pub fn len(&self) -> usize {
        self.generation.as_ref().map_or(0, Generation::len)
    }

    /// Check if nothing has been staged
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the staged generation was discarded or already published
    pub fn is_discarded(&self) -> bool {
        self.generation.is_none()
    }

    #[inline]
    pub(crate) fn ticket(&self) -> StagingTicket {
        self.ticket
    }

    /// Insert into the staged generation
    ///
    /// A rejected connector is retired before the error is returned.
    pub(crate) fn insert(&mut self, id: SupplierId, connector: C) -> Result<()> {
        let Some(generation) = self.generation.as_mut() else {
            connector.retire();
            return Err(RegistryError::aborted(self.ticket.seq));
        };

        generation.insert(id, connector).map_err(|rejected| {
            rejected.retire();
            RegistryError::duplicate_supplier(id, self.ticket.seq)
        })
    }

    /// Move the staged generation out for publishing
    ///
    /// The caller holds the slot lock and is responsible for clearing it.
    pub(crate) fn take_generation(&mut self) -> Option<Generation<C>> {
        self.generation.take()
    }

    /// Discard the staged generation; returns false if it was already gone
    pub(crate) fn discard(&mut self) -> bool {
        let Some(generation) = self.generation.take() else {
            return false;
        };

        generation.retire_all();

        let mut slot = self.slot.lock();
        if *slot == Some(self.ticket) {
            *slot = None;
        }
        drop(slot);

        self.metrics.record_abort();
        true
    }
}

impl<C: Retire> Drop for StagingHandle<C> {
    fn drop(&mut self) {
        if self.discard() {
            tracing::debug!(
                seq = self.ticket.seq,
                "staging handle dropped before publish, generation discarded"
            );
        }
    }
}

impl<C: Retire> std::fmt::Debug for StagingHandle<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingHandle")
            .field("seq", &self.ticket.seq)
            .field("staged", &self.len())
            .field("discarded", &self.is_discarded())
            .finish()
    }
}
