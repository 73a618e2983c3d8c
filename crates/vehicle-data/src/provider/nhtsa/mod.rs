//! NHTSA public APIs (no key required).
//!
//! - Recalls: `https://api.nhtsa.gov/recalls/recallsByVehicle`
//! - vPIC VIN decoding: `https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValues/{vin}`
//!
//! Both APIs use PascalCase field names and represent missing values as
//! empty strings, which are mapped to `None` here.

mod recalls;
mod vpic;

pub use recalls::NhtsaRecallProvider;
pub use vpic::NhtsaVinDecoder;

/// NHTSA returns "" or "Not Applicable" for absent values.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("not applicable"))
}
