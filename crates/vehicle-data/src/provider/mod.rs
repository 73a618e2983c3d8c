//! Vehicle data provider abstractions and implementations.
//!
//! This module contains:
//! - One trait per capability (`VehicleLookupProvider`, `EmissionsProvider`, ...)
//! - Fallback ("mock") implementations used when nothing usable is configured
//! - Concrete adapters (registry API, ADEME, NHTSA, Crit'Air rules, infra backends)
//!
//! # Architecture
//!
//! The provider system is designed to be:
//! - **Provider-agnostic**: the orchestration layer only sees the capability traits
//! - **Swappable**: which implementation backs a capability is decided at runtime
//!   from configuration, by the resolver in the core crate
//! - **Self-contained**: remote adapters carry their own timeout and bounded retry
//!   (see [`http`]); callers never retry

mod traits;

pub mod ademe;
pub mod blob_storage;
pub mod critair;
pub mod http;
pub mod identity;
pub mod mock;
pub mod nhtsa;
pub mod plate_registry;

// Re-exports
pub use traits::{
    BlobStorage, EmissionClassProvider, EmissionsProvider, IdentityProvider, Principal,
    RecallProvider, VehicleLookupProvider, VinDecoder,
};
