use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use autofill_vehicle_data::{Capability, IdentifierType, VehicleIdentifier};

/// Cache lookups are per vehicle and per capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKey {
    pub vehicle_identifier: String,
    pub identifier_type: IdentifierType,
    pub capability: Capability,
}

impl CacheKey {
    pub fn new(identifier: &VehicleIdentifier, capability: Capability) -> Self {
        Self {
            vehicle_identifier: identifier.value.clone(),
            identifier_type: identifier.kind,
            capability,
        }
    }
}

/// One stored provider response.
///
/// Rows are never deleted; a newer write for the same key flips the older
/// row's `is_valid` to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub id: String,
    pub key: CacheKey,
    /// Serialized provider response (JSON).
    pub payload: String,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_valid: bool,
}

impl CacheEntry {
    pub fn new(
        key: CacheKey,
        payload: String,
        fetched_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key,
            payload,
            fetched_at,
            expires_at,
            is_valid: true,
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_valid && self.expires_at > now
    }
}
