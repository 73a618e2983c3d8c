//! Vehicle data models
//!
//! This module contains the typed request/response pairs exchanged with providers:
//! - `capability` - The closed set of capabilities a provider can implement
//! - `identifier` - Normalized vehicle identifier (plate or VIN)
//! - `vehicle` - Registry lookup result (VehicleRecord) and fuel type
//! - `emissions` - Emissions query and report
//! - `recalls` - Recall query, report and campaigns
//! - `classification` - Low-emission (Crit'Air) classification
//! - `vin` - VIN technical decode

mod capability;
mod classification;
mod emissions;
mod identifier;
mod recalls;
mod vehicle;
mod vin;

pub use capability::Capability;
pub use classification::{ClassificationQuery, EmissionClassification};
pub use emissions::{EmissionsQuery, EmissionsReport};
pub use identifier::{IdentifierType, VehicleIdentifier};
pub use recalls::{RecallCampaign, RecallQuery, RecallReport};
pub use vehicle::{FuelType, VehicleRecord};
pub use vin::{VinQuery, VinSpecification};
