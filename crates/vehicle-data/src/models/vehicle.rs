use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Energy source of a vehicle as reported by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hydrogen,
    Lpg,
    Cng,
    HybridPetrol,
    HybridDiesel,
    PluginHybrid,
    Other,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
            Self::Electric => "electric",
            Self::Hydrogen => "hydrogen",
            Self::Lpg => "lpg",
            Self::Cng => "cng",
            Self::HybridPetrol => "hybrid_petrol",
            Self::HybridDiesel => "hybrid_diesel",
            Self::PluginHybrid => "plugin_hybrid",
            Self::Other => "other",
        }
    }

    /// Maps the loose labels registries use ("ESSENCE", "Gasoline", "EL"...).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "petrol" | "gasoline" | "essence" | "es" => Self::Petrol,
            "diesel" | "gazole" | "go" => Self::Diesel,
            "electric" | "electricity" | "electrique" | "el" => Self::Electric,
            "hydrogen" | "hydrogene" | "h2" => Self::Hydrogen,
            "lpg" | "gpl" => Self::Lpg,
            "cng" | "gnv" => Self::Cng,
            "hybrid" | "hybrid_petrol" | "essence-electrique" => Self::HybridPetrol,
            "hybrid_diesel" | "gazole-electrique" => Self::HybridDiesel,
            "plugin_hybrid" | "phev" | "hybride rechargeable" => Self::PluginHybrid,
            _ => Self::Other,
        }
    }
}

/// Registry record returned by a vehicle lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub variant: Option<String>,
    pub vin: Option<String>,
    pub first_registration_date: Option<NaiveDate>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<String>,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub doors: Option<u8>,
    pub seats: Option<u8>,
    pub fiscal_horsepower: Option<u16>,
    pub power_kw: Option<u16>,
    /// Euro emission standard number (e.g. 6 for Euro 6d).
    pub euro_standard: Option<u8>,
}

impl VehicleRecord {
    /// Year of first registration, used as the model year by downstream queries.
    pub fn registration_year(&self) -> Option<i32> {
        self.first_registration_date.map(|d| d.year())
    }
}
