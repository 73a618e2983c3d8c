use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autofill_vehicle_data::IdentifierType;

/// Summary of one auto-fill run. Carries no vehicle identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub action: String,
    pub identifier_type: IdentifierType,
    pub listing_id: String,
    pub fields_extracted: usize,
    pub sources_attempted: usize,
    pub successes: usize,
    pub cache_hits: usize,
    pub created_at: DateTime<Utc>,
}
