//! Connector registry
//!
//! The only state shared between the refresh writer and bid-path readers is
//! the `active` pointer. Everything else is writer-side.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;
use bidhub_protocol::SupplierId;
use parking_lot::Mutex;

use crate::error::{RegistryError, Result};
use crate::staging::{StagingSlot, StagingTicket};
use crate::{ConnectorLease, Generation, RegistryMetrics, Retire, StagingHandle};

/// Double-buffered supplier → connector table
///
/// Readers resolve connectors against the active generation with a single
/// atomic load. The writer builds the next generation through a
/// `StagingHandle` and publishes it with `switch_generation`, which swaps
/// the active pointer and queues the previous generation for disposal.
///
/// Share it between the refresh side and the bid path with an `Arc`.
pub struct ConnectorRegistry<C: Retire> {
    /// Active generation (`None` until the first publish)
    active: ArcSwapOption<Generation<C>>,

    /// Staging generation currently in flight, if any
    staging: StagingSlot,

    /// Source of staging ticket ids
    next_ticket: AtomicU64,

    /// Highest sequence ever published; survives `drain()`
    last_published: AtomicU64,

    /// Superseded generations waiting for their leases to drain
    retired: Mutex<Vec<Arc<Generation<C>>>>,

    metrics: Arc<RegistryMetrics>,
}

impl<C: Retire> Default for ConnectorRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Retire> ConnectorRegistry<C> {
    /// Create an empty registry (no active generation)
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: ArcSwapOption::empty(),
            staging: Arc::new(Mutex::new(None)),
            next_ticket: AtomicU64::new(1),
            last_published: AtomicU64::new(0),
            retired: Mutex::new(Vec::new()),
            metrics: Arc::new(RegistryMetrics::new()),
        }
    }

    // =========================================================================
    // Read path
    // =========================================================================

    /// Resolve a supplier's connector in the active generation
    ///
    /// Lock-free: one atomic load and one hash probe. Never blocked by a
    /// refresh in progress. Returns `None` for unknown suppliers and before
    /// the first generation is published.
    #[inline]
    pub fn lookup(&self, id: &SupplierId) -> Option<ConnectorLease<C>> {
        let lease = self.active.load_full().and_then(|generation| {
            generation
                .slot(id)
                .map(|slot| ConnectorLease::new(generation, slot))
        });
        self.metrics.record_lookup(lease.is_some());
        lease
    }

    /// Check if a supplier has a connector in the active generation
    pub fn contains(&self, id: &SupplierId) -> bool {
        self.active.load().as_deref().is_some_and(|g| g.contains(id))
    }

    /// The active generation, pinned
    pub fn snapshot(&self) -> Option<Arc<Generation<C>>> {
        self.active.load_full()
    }

    /// Sequence of the active generation
    pub fn active_seq(&self) -> Option<u64> {
        self.active.load().as_deref().map(Generation::seq)
    }

    /// Number of connectors in the active generation
    pub fn len(&self) -> usize {
        self.active.load().as_deref().map_or(0, Generation::len)
    }

    /// Check if no connector is available
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Write path
    // =========================================================================

    /// Start building the next generation
    ///
    /// The new generation is tagged one past the last published sequence,
    /// even if the active generation was drained since. An aborted staging
    /// generation does not consume its sequence.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyStaging` if another staging generation is in flight.
    /// The existing one is left untouched.
    pub fn begin_staging(&self) -> Result<StagingHandle<C>> {
        let mut slot = self.staging.lock();
        if let Some(in_flight) = *slot {
            return Err(RegistryError::already_staging(in_flight.seq));
        }

        let ticket = StagingTicket {
            id: self.next_ticket.fetch_add(1, Ordering::Relaxed),
            seq: self.last_published.load(Ordering::Acquire) + 1,
        };
        *slot = Some(ticket);
        drop(slot);

        tracing::debug!(seq = ticket.seq, "staging generation started");
        Ok(StagingHandle::new(
            ticket,
            Arc::clone(&self.staging),
            Arc::clone(&self.metrics),
        ))
    }

    /// Add a connector to the staging generation
    ///
    /// Never touches the active generation.
    ///
    /// # Errors
    ///
    /// - `DuplicateSupplier` if the id was already staged in this cycle
    /// - `Aborted` if the handle was discarded
    ///
    /// A rejected connector is retired.
    pub fn add(&self, staging: &mut StagingHandle<C>, id: SupplierId, connector: C) -> Result<()> {
        staging.insert(id, connector)
    }

    /// Publish the staging generation
    ///
    /// Swaps the active pointer in one atomic step: a lookup sees either the
    /// complete previous generation or the complete new one. The previous
    /// generation is queued for `dispose_retired()`.
    ///
    /// Returns the sequence of the newly active generation.
    ///
    /// # Errors
    ///
    /// Returns `Aborted` if the handle was already discarded or no longer
    /// owns the staging slot.
    pub fn switch_generation(&self, mut staging: StagingHandle<C>) -> Result<u64> {
        let seq = staging.seq();
        let mut slot = self.staging.lock();

        if *slot != Some(staging.ticket()) {
            drop(slot);
            return Err(RegistryError::aborted(seq));
        }
        let Some(generation) = staging.take_generation() else {
            drop(slot);
            return Err(RegistryError::aborted(seq));
        };

        let connectors = generation.len();
        let previous = self.active.swap(Some(Arc::new(generation)));
        self.last_published.store(seq, Ordering::Release);
        *slot = None;
        drop(slot);

        self.metrics.record_switch();
        let previous_seq = previous.as_deref().map(Generation::seq);
        if let Some(previous) = previous {
            self.retired.lock().push(previous);
        }

        tracing::info!(
            seq,
            connectors,
            previous = ?previous_seq,
            "connector generation published"
        );

        Ok(seq)
    }

    /// Discard the staging generation without publishing
    ///
    /// The active generation and readers are unaffected. Staged connectors
    /// are retired. Calling it on an already discarded handle is a no-op.
    /// Dropping the handle has the same effect and is counted the same way.
    pub fn abort_staging(&self, staging: &mut StagingHandle<C>) {
        if staging.discard() {
            tracing::info!(seq = staging.seq(), "staging generation discarded");
        }
    }

    /// Check if a staging generation is in flight
    pub fn is_staging(&self) -> bool {
        self.staging.lock().is_some()
    }

    // =========================================================================
    // Disposal
    // =========================================================================

    /// Dispose retired generations that no reader still references
    ///
    /// A generation pinned by a live `ConnectorLease` stays queued and is
    /// retried on the next call. The active generation is never in the
    /// queue, so it is never disposed here.
    ///
    /// Returns the number of generations disposed.
    pub fn dispose_retired(&self) -> usize {
        let mut retired = self.retired.lock();
        let mut pending = Vec::with_capacity(retired.len());
        let mut disposed = 0usize;

        for generation in retired.drain(..) {
            match Arc::try_unwrap(generation) {
                Ok(generation) => {
                    generation.retire_all();
                    tracing::debug!(
                        seq = generation.seq(),
                        connectors = generation.len(),
                        "retired generation disposed"
                    );
                    disposed += 1;
                }
                Err(pinned) => pending.push(pinned),
            }
        }
        *retired = pending;
        let waiting = retired.len();
        drop(retired);

        if disposed > 0 {
            self.metrics.record_disposed(disposed as u64);
        }
        if waiting > 0 {
            tracing::debug!(waiting, "retired generations still referenced by readers");
        }

        disposed
    }

    /// Number of retired generations waiting for disposal
    pub fn retired_count(&self) -> usize {
        self.retired.lock().len()
    }

    /// Unpublish the active generation and dispose everything unreferenced
    ///
    /// Used at shutdown. Lookups return `None` afterwards.
    pub fn drain(&self) -> usize {
        if let Some(active) = self.active.swap(None) {
            self.retired.lock().push(active);
        }
        self.dispose_retired()
    }

    /// Get reference to metrics
    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }
}

impl<C: Retire> std::fmt::Debug for ConnectorRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorRegistry")
            .field("active_seq", &self.active_seq())
            .field("connectors", &self.len())
            .field("staging", &self.is_staging())
            .field("retired", &self.retired_count())
            .finish()
    }
}
