//! Autofill Vehicle Data Crate
//!
//! This crate provides provider-agnostic vehicle data fetching for the
//! listing auto-fill workflow.
//!
//! # Overview
//!
//! The vehicle data crate supports:
//! - Five data capabilities: registry lookup, emissions, recalls,
//!   low-emission classification and VIN decode
//! - Two infrastructure capabilities: identity and blob storage
//! - Typed request/response pairs per capability
//! - Fallback implementations for every data capability
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +--------------------+
//! |  Core resolver   | --> |  Capability trait  |  (VehicleLookupProvider, ...)
//! +------------------+     +--------------------+
//!                                  |
//!                                  v
//!                       +----------------------+
//!                       |   Concrete adapter   |  (registry API, NHTSA, rules...)
//!                       +----------------------+
//!                                  |
//!                                  v
//!                       +----------------------+
//!                       |  HttpClient + retry  |  (timeout, linear backoff)
//!                       +----------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Capability`] - Closed set of capabilities
//! - [`VehicleIdentifier`] - Normalized plate or VIN
//! - [`VehicleRecord`], [`EmissionsReport`], [`RecallReport`],
//!   [`EmissionClassification`], [`VinSpecification`] - Typed provider responses
//! - [`ProviderError`] - Error returned by every provider call

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{ProviderError, RetryClass};

pub use models::{
    Capability, ClassificationQuery, EmissionClassification, EmissionsQuery, EmissionsReport,
    FuelType, IdentifierType, RecallCampaign, RecallQuery, RecallReport, VehicleIdentifier,
    VehicleRecord, VinQuery, VinSpecification,
};

pub use provider::ademe::AdemeEmissionsProvider;
pub use provider::blob_storage::LocalFsBlobStorage;
pub use provider::critair::CritAirRulesProvider;
pub use provider::identity::StaticTokenIdentity;
pub use provider::mock::{
    MockEmissionClass, MockEmissions, MockRecalls, MockVehicleLookup, MockVinDecoder,
    MOCK_PROVIDER_ID,
};
pub use provider::nhtsa::{NhtsaRecallProvider, NhtsaVinDecoder};
pub use provider::plate_registry::PlateRegistryProvider;
pub use provider::{
    BlobStorage, EmissionClassProvider, EmissionsProvider, IdentityProvider, Principal,
    RecallProvider, VehicleLookupProvider, VinDecoder,
};
