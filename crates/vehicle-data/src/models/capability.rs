use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Abstract data-fetching contract a provider can fulfil.
///
/// The first five capabilities feed the listing auto-fill. `Identity` and
/// `BlobStorage` are infrastructure capabilities resolved through the same
/// machinery but without a fallback implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    VehicleLookup,
    Emissions,
    Recalls,
    LowEmissionClass,
    VinDecode,
    Identity,
    BlobStorage,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Capability::VehicleLookup,
        Capability::Emissions,
        Capability::Recalls,
        Capability::LowEmissionClass,
        Capability::VinDecode,
        Capability::Identity,
        Capability::BlobStorage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VehicleLookup => "vehicle_lookup",
            Self::Emissions => "emissions",
            Self::Recalls => "recalls",
            Self::LowEmissionClass => "low_emission_class",
            Self::VinDecode => "vin_decode",
            Self::Identity => "identity",
            Self::BlobStorage => "blob_storage",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown capability: {}", s))
    }
}
