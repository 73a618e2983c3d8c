use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FuelType, VehicleIdentifier, VehicleRecord};

/// Low-emission classification arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationQuery {
    pub identifier: VehicleIdentifier,
    pub fuel_type: Option<FuelType>,
    pub euro_standard: Option<u8>,
    pub first_registration_date: Option<NaiveDate>,
}

impl ClassificationQuery {
    pub fn new(identifier: &VehicleIdentifier, vehicle: Option<&VehicleRecord>) -> Self {
        Self {
            identifier: identifier.clone(),
            fuel_type: vehicle.and_then(|v| v.fuel_type),
            euro_standard: vehicle.and_then(|v| v.euro_standard),
            first_registration_date: vehicle.and_then(|v| v.first_registration_date),
        }
    }
}

/// Crit'Air classification. `level` 0 is the electric/hydrogen sticker,
/// 1..=5 the combustion stickers; `None` means the vehicle is unclassified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionClassification {
    pub level: Option<u8>,
}

impl EmissionClassification {
    pub fn level(level: u8) -> Self {
        Self { level: Some(level) }
    }

    pub fn unclassified() -> Self {
        Self { level: None }
    }
}
