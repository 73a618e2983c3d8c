use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listing fact attributed to the source it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifiedField {
    pub listing_id: String,
    pub field_name: String,
    pub field_value: String,
    pub source: String,
    pub source_timestamp: DateTime<Utc>,
    pub is_certified: bool,
}
