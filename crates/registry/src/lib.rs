//! Bidhub Registry - Generation-swapped connector table
//!
//! Maps supplier ids to live outbound connectors for the bid path.
//! The table is never mutated once readers can see it: a refresh builds a
//! complete replacement off to the side and publishes it with one atomic
//! pointer swap.
//!
//! # Design
//!
//! ```text
//! [begin_staging()] → [add() × N] → [switch_generation()]
//!                                          ↓ ArcSwap::swap
//! [lookup()] → [ArcSwap::load()] ────→ active Generation
//!                                          ↓ (old value)
//!                                   retired queue → dispose_retired()
//! ```
//!
//! - **Lock-free reads**: `lookup()` is an atomic load plus a `HashMap` probe
//! - **Single writer**: at most one staging generation exists at a time
//! - **Refcounted disposal**: a retired generation is only disposed once no
//!   `ConnectorLease` pins it
//!
//! # Example
//!
//! ```
//! use bidhub_protocol::SupplierId;
//! use bidhub_registry::{ConnectorRegistry, Retire};
//!
//! struct Endpoint(&'static str);
//! impl Retire for Endpoint {
//!     fn retire(&self) {}
//! }
//!
//! let registry = ConnectorRegistry::new();
//! assert!(registry.lookup(&SupplierId::new(1)).is_none());
//!
//! let mut staging = registry.begin_staging().unwrap();
//! registry.add(&mut staging, SupplierId::new(1), Endpoint("http://a")).unwrap();
//! let seq = registry.switch_generation(staging).unwrap();
//!
//! let lease = registry.lookup(&SupplierId::new(1)).unwrap();
//! assert_eq!(lease.0, "http://a");
//! assert_eq!(lease.generation_seq(), seq);
//! ```

mod error;
mod generation;
mod lease;
mod metrics;
mod registry;
mod staging;

pub use error::{RegistryError, Result};
pub use generation::Generation;
pub use lease::ConnectorLease;
pub use metrics::RegistryMetrics;
pub use registry::ConnectorRegistry;
pub use staging::StagingHandle;

/// Release of the outbound resources held by a connector
///
/// Called when the generation owning the connector is disposed or its last
/// reference is dropped, and when a staged connector is discarded without
/// ever being published. A generation retires its connectors once, but a
/// connector rejected by `add` is retired on its own.
pub trait Retire: Send + Sync {
    /// Close connections and release resources
    fn retire(&self);
}
