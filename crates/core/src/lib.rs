//! Autofill Core - provider orchestration for vehicle listing auto-fill.
//!
//! This crate resolves each data capability to a configured provider,
//! meters every provider call, caches responses per vehicle and runs the
//! auto-fill workflow. It is storage-agnostic: stores and sinks are traits
//! with in-memory implementations.

pub mod audit;
pub mod autofill;
pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod listings;
pub mod providers;
pub mod telemetry;

// Re-export the workflow entry points
pub use autofill::{AutofillRequest, AutofillResult, AutofillService, AutofillServiceTrait};
pub use providers::CapabilityResolver;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
