//! Provider registration models.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autofill_vehicle_data::Capability;

/// Whether a registration is the one in use for its capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Active,
    Inactive,
}

/// Admin-configured binding of a provider key to a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRegistration {
    pub key: String,
    pub capability: Capability,
    pub status: RegistrationStatus,
    /// Cost charged by the provider for one call, in EUR.
    #[serde(default)]
    pub cost_per_call: Decimal,
}

impl ProviderRegistration {
    pub fn active(capability: Capability, key: impl Into<String>, cost_per_call: Decimal) -> Self {
        Self {
            key: key.into(),
            capability,
            status: RegistrationStatus::Active,
            cost_per_call,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RegistrationStatus::Active
    }
}

/// On-disk shape of the provider configuration file.
///
/// ```json
/// {
///   "registrations": [
///     { "key": "nhtsa_vpic", "capability": "vin_decode", "status": "active", "costPerCall": 0 }
///   ],
///   "tunables": { "cache_ttl_hours": "24" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigFile {
    #[serde(default)]
    pub registrations: Vec<ProviderRegistration>,
    #[serde(default)]
    pub tunables: HashMap<String, String>,
}
