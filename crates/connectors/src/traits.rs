//! Collaborator traits for a refresh cycle
//!
//! Both traits are implemented for `Arc<T>` so one source or factory can be
//! shared between a coordinator and its callers.

use bidhub_protocol::{SupplierDefinition, SupplierSet};
use bidhub_registry::Retire;

use crate::error::ConnectorError;

/// Source of the current supplier definitions
///
/// Returns a complete, self-consistent set or an error, never a partial
/// set. An empty set is a successful fetch; deciding what to do with it is
/// the caller's business.
pub trait SupplierSource: Send + Sync {
    /// Short description for log lines (e.g. the feed URL)
    fn describe(&self) -> String;

    /// Fetch and decode the supplier feed
    fn fetch_suppliers(
        &self,
    ) -> impl std::future::Future<Output = Result<SupplierSet, ConnectorError>> + Send;
}

/// Builder of ready-to-use outbound connectors
///
/// Must be safe to call repeatedly and independently per supplier.
pub trait ConnectorFactory: Send + Sync {
    /// Connector type produced
    type Connector: Retire + 'static;

    /// Build a connector bound to one supplier's endpoint
    fn build(
        &self,
        supplier: &SupplierDefinition,
    ) -> impl std::future::Future<Output = Result<Self::Connector, ConnectorError>> + Send;
}

impl<T: SupplierSource> SupplierSource for std::sync::Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn fetch_suppliers(
        &self,
    ) -> impl std::future::Future<Output = Result<SupplierSet, ConnectorError>> + Send {
        (**self).fetch_suppliers()
    }
}

impl<T: ConnectorFactory> ConnectorFactory for std::sync::Arc<T> {
    type Connector = T::Connector;

    fn build(
        &self,
        supplier: &SupplierDefinition,
    ) -> impl std::future::Future<Output = Result<Self::Connector, ConnectorError>> + Send {
        (**self).build(supplier)
    }
}
