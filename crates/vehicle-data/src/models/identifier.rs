use std::fmt;

use serde::{Deserialize, Serialize};

/// How a vehicle is identified in a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Plate,
    Vin,
}

impl IdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plate => "plate",
            Self::Vin => "vin",
        }
    }

    /// Parses the wire value. Only the exact lowercase names are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "plate" => Some(Self::Plate),
            "vin" => Some(Self::Vin),
            _ => None,
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized vehicle identifier.
///
/// Construction does not validate; the auto-fill layer normalizes and checks
/// the format before building one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleIdentifier {
    pub value: String,
    pub kind: IdentifierType,
}

impl VehicleIdentifier {
    pub fn plate(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IdentifierType::Plate,
        }
    }

    pub fn vin(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IdentifierType::Vin,
        }
    }

    /// The VIN carried by this identifier, if it is one.
    pub fn as_vin(&self) -> Option<&str> {
        match self.kind {
            IdentifierType::Vin => Some(&self.value),
            IdentifierType::Plate => None,
        }
    }
}

impl fmt::Display for VehicleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}
