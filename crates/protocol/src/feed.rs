//! Supplier feed wire format
//!
//! The feed is a JSON document wrapping the supplier list:
//!
//! ```json
//! { "data": [ { "supplierId": 1, "shortName": "dsp_a", "endPoint": "http://..." } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Result, SupplierDefinition, SupplierSet};

/// JSON envelope of the supplier feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierFeed {
    /// Supplier entries in feed order
    pub data: Vec<SupplierDefinition>,
}

impl SupplierFeed {
    /// Decode a feed document into a supplier set
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Decode` if the payload is not valid JSON or
    /// lacks the `data` array. An empty `data` array decodes successfully.
    pub fn decode(bytes: &[u8]) -> Result<SupplierSet> {
        let feed: SupplierFeed = serde_json::from_slice(bytes)?;
        Ok(SupplierSet::new(feed.data))
    }

    /// Encode a supplier set as a pretty-printed feed document
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Decode` if serialization fails.
    pub fn encode_pretty(set: &SupplierSet) -> Result<String> {
        let feed = SupplierFeed {
            data: set.as_slice().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&feed)?)
    }
}

impl From<SupplierSet> for SupplierFeed {
    fn from(set: SupplierSet) -> Self {
        Self {
            data: set.into_iter().collect(),
        }
    }
}
