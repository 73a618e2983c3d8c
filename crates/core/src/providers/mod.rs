//! Capability resolution.
//!
//! Maps each [`Capability`](autofill_vehicle_data::Capability) to a live
//! implementation chosen from the configuration snapshot, falling back to the
//! mock implementation where one exists. Every resolved implementation is
//! wrapped so its calls go through the [`CallMeter`](crate::telemetry::CallMeter).

mod adapter;
mod instrumented;
mod provider_kind;
mod resolver;

pub use adapter::Adapter;
pub use instrumented::Instrumented;
pub use provider_kind::{has_fallback, ProviderKind};
pub use resolver::CapabilityResolver;
