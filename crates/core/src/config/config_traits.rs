//! Read-only view of the provider configuration.

use autofill_vehicle_data::Capability;

use super::ProviderRegistration;

/// Snapshot of which provider is active per capability, plus tunables.
///
/// Implementations must be cheap to call; the resolver consults the snapshot
/// on every cache miss and the response cache re-reads the TTL on every write.
pub trait ConfigSnapshot: Send + Sync {
    /// The active registration for a capability, if any.
    fn active_registration(&self, capability: Capability) -> Option<ProviderRegistration>;

    /// A raw tunable value by key.
    fn tunable(&self, key: &str) -> Option<String>;
}
