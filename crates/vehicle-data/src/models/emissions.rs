use serde::{Deserialize, Serialize};

use super::{FuelType, VehicleIdentifier, VehicleRecord};

/// Emissions lookup arguments, filled from the registry record when available.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsQuery {
    pub identifier: VehicleIdentifier,
    pub make: Option<String>,
    pub model: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub year: Option<i32>,
}

impl EmissionsQuery {
    pub fn new(identifier: &VehicleIdentifier, vehicle: Option<&VehicleRecord>) -> Self {
        Self {
            identifier: identifier.clone(),
            make: vehicle.and_then(|v| v.make.clone()),
            model: vehicle.and_then(|v| v.model.clone()),
            fuel_type: vehicle.and_then(|v| v.fuel_type),
            year: vehicle.and_then(VehicleRecord::registration_year),
        }
    }
}

/// Emissions data for one vehicle type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsReport {
    /// Energy label letter (A..G).
    pub energy_class: Option<String>,
    pub co2_grams_per_km: Option<u32>,
    /// Combined cycle consumption in l/100km.
    pub fuel_consumption_mixed: Option<f64>,
    pub euro_standard: Option<u8>,
}
