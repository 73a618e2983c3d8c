use serde::{Deserialize, Serialize};

use autofill_vehicle_data::Capability;

/// Auto-fill input as received from the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillRequest {
    pub identifier: String,
    /// "plate" or "vin"
    pub identifier_type: String,
}

impl AutofillRequest {
    pub fn plate(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            identifier_type: "plate".to_string(),
        }
    }

    pub fn vin(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            identifier_type: "vin".to_string(),
        }
    }
}

/// How a capability's data was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Cached,
    Failed,
}

/// Outcome of one capability within an auto-fill run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub capability: Capability,
    pub provider_key: String,
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One extracted listing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifiedFieldResult {
    pub field_name: String,
    pub field_value: String,
    pub source: String,
    pub is_certified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillResult {
    /// Temporary listing id the fields were stored under.
    pub listing_id: String,
    pub fields: Vec<CertifiedFieldResult>,
    /// Ordered: vehicle lookup, emissions, recalls, low-emission class, VIN decode.
    pub sources: Vec<SourceStatus>,
}

impl AutofillResult {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field_name == name)
            .map(|f| f.field_value.as_str())
    }

    pub fn source(&self, capability: Capability) -> Option<&SourceStatus> {
        self.sources.iter().find(|s| s.capability == capability)
    }
}
