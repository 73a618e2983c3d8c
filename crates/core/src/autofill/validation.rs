//! Identifier normalization and validation.

use lazy_static::lazy_static;
use regex::Regex;

use autofill_vehicle_data::{IdentifierType, VehicleIdentifier};

use super::autofill_model::AutofillRequest;
use crate::errors::ValidationError;

lazy_static! {
    /// French SIV plate (AB-123-CD); separators optional.
    static ref PLATE_PATTERN: Regex =
        Regex::new(r"^([A-Z]{2})[- ]?([0-9]{3})[- ]?([A-Z]{2})$").expect("Invalid regex pattern");

    /// 17-character VIN; I, O and Q are never used.
    static ref VIN_PATTERN: Regex =
        Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("Invalid regex pattern");
}

/// Normalizes a plate to its dashed form, or `None` if it is not a plate.
pub fn normalize_plate(raw: &str) -> Option<String> {
    let value = raw.trim().to_uppercase();
    let caps = PLATE_PATTERN.captures(&value)?;
    Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

/// Normalizes a VIN, or `None` if it is not a VIN.
pub fn normalize_vin(raw: &str) -> Option<String> {
    let value = raw.trim().to_uppercase();
    VIN_PATTERN.is_match(&value).then_some(value)
}

/// Checks an auto-fill request and returns the normalized identifier.
pub fn validate_request(request: &AutofillRequest) -> Result<VehicleIdentifier, ValidationError> {
    let kind = IdentifierType::parse(request.identifier_type.trim()).ok_or_else(|| {
        ValidationError::UnsupportedIdentifierType(request.identifier_type.clone())
    })?;

    match kind {
        IdentifierType::Plate => normalize_plate(&request.identifier)
            .map(VehicleIdentifier::plate)
            .ok_or_else(|| ValidationError::InvalidPlate(request.identifier.trim().to_string())),
        IdentifierType::Vin => normalize_vin(&request.identifier)
            .map(VehicleIdentifier::vin)
            .ok_or_else(|| ValidationError::InvalidVin(request.identifier.trim().to_string())),
    }
}
