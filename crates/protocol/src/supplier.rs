//! Supplier definition
//!
//! One demand partner as described by the supplier feed. Everything a
//! connector factory needs to bind an outbound connector lives here.

use serde::{Deserialize, Serialize};

use crate::SupplierId;

/// Immutable description of one supplier endpoint
///
/// Field names follow the feed's camelCase wire format.
///
/// # Example
///
/// ```
/// use bidhub_protocol::{SupplierDefinition, SupplierId};
///
/// let supplier = SupplierDefinition::new(SupplierId::new(1), "http://dsp.example/bid");
/// assert!(supplier.active);
/// assert_eq!(supplier.content_type, "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDefinition {
    /// Supplier identity (registry key)
    pub supplier_id: SupplierId,

    /// Human-readable short name (logging only)
    #[serde(default)]
    pub short_name: String,

    /// Bid endpoint URL
    #[serde(rename = "endPoint")]
    pub endpoint: String,

    /// OpenRTB version announced in the `x-openrtb-version` header
    #[serde(default = "default_openrtb_version")]
    pub open_rtb_version: String,

    /// Content type of bid requests
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Accepted response encoding (e.g. "gzip")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_encoding: Option<String>,

    /// Request body encoding (e.g. "gzip")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,

    /// Bid currency
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Per-supplier request budget in milliseconds
    #[serde(default, rename = "tmax", skip_serializing_if = "Option::is_none")]
    pub tmax_ms: Option<u32>,

    /// Keep outbound connections alive between requests
    #[serde(default = "default_true")]
    pub connection_keep_alive: bool,

    /// Supplier is in test mode
    #[serde(default)]
    pub under_test: bool,

    /// Inactive suppliers are not built into a generation
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_openrtb_version() -> String {
    crate::DEFAULT_OPENRTB_VERSION.to_string()
}

fn default_content_type() -> String {
    crate::DEFAULT_CONTENT_TYPE.to_string()
}

fn default_currency() -> String {
    crate::DEFAULT_CURRENCY.to_string()
}

fn default_true() -> bool {
    true
}

impl SupplierDefinition {
    /// Create an active supplier with default protocol settings
    pub fn new(supplier_id: SupplierId, endpoint: impl Into<String>) -> Self {
        Self {
            supplier_id,
            short_name: String::new(),
            endpoint: endpoint.into(),
            open_rtb_version: default_openrtb_version(),
            content_type: default_content_type(),
            accept_encoding: None,
            content_encoding: None,
            currency: default_currency(),
            tmax_ms: None,
            connection_keep_alive: true,
            under_test: false,
            active: true,
        }
    }

    /// Set the short name
    #[must_use]
    pub fn with_short_name(mut self, name: impl Into<String>) -> Self {
        self.short_name = name.into();
        self
    }

    /// Set the active flag
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Name for log lines: the short name, or the id if none was given
    pub fn label(&self) -> String {
        if self.short_name.is_empty() {
            self.supplier_id.to_string()
        } else {
            self.short_name.clone()
        }
    }
}
