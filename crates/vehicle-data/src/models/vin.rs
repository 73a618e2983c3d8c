use serde::{Deserialize, Serialize};

/// VIN decode arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinQuery {
    pub vin: String,
}

/// Technical specification decoded from a VIN.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinSpecification {
    pub body_class: Option<String>,
    pub manufacturer: Option<String>,
    pub model_year: Option<u16>,
    pub plant_country: Option<String>,
    pub engine_cylinders: Option<u8>,
    pub displacement_liters: Option<f64>,
    pub drive_type: Option<String>,
}
