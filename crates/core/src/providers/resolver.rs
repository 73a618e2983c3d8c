//! Capability resolver.
//!
//! Resolution order for a capability:
//! 1. a test override, if one is installed
//! 2. the memoized adapter, if any
//! 3. the active registration's provider, instrumented with its cost per call
//! 4. the mock provider at zero cost, for capabilities that have one
//!
//! Infrastructure capabilities have no mock and surface a
//! [`ConfigurationError`] instead of falling back.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};
use rust_decimal::Decimal;

use autofill_vehicle_data::provider::{
    BlobStorage, EmissionClassProvider, EmissionsProvider, IdentityProvider, RecallProvider,
    VehicleLookupProvider, VinDecoder,
};
use autofill_vehicle_data::{Capability, MOCK_PROVIDER_ID};

use super::provider_kind::has_fallback;
use super::{Adapter, ProviderKind};
use crate::config::ConfigSnapshot;
use crate::errors::ConfigurationError;
use crate::telemetry::{CallContext, CallMeter};

type AdapterMap = HashMap<Capability, Adapter>;

/// Memoizing capability-to-implementation resolver.
///
/// Configuration changes are only picked up after [`invalidate`](Self::invalidate);
/// callers that mutate registrations must invalidate afterwards.
pub struct CapabilityResolver {
    config: Arc<dyn ConfigSnapshot>,
    meter: Arc<CallMeter>,
    memo: RwLock<AdapterMap>,
    overrides: RwLock<AdapterMap>,
}

fn read(lock: &RwLock<AdapterMap>) -> RwLockReadGuard<'_, AdapterMap> {
    lock.read().unwrap_or_else(|poisoned| {
        warn!("Resolver lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

fn write(lock: &RwLock<AdapterMap>) -> RwLockWriteGuard<'_, AdapterMap> {
    lock.write().unwrap_or_else(|poisoned| {
        warn!("Resolver lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

impl CapabilityResolver {
    pub fn new(config: Arc<dyn ConfigSnapshot>, meter: Arc<CallMeter>) -> Self {
        Self {
            config,
            meter,
            memo: RwLock::new(HashMap::new()),
            overrides: RwLock::new(HashMap::new()),
        }
    }

    pub fn meter(&self) -> &Arc<CallMeter> {
        &self.meter
    }

    /// Returns the implementation currently serving `capability`.
    pub fn resolve(&self, capability: Capability) -> Result<Adapter, ConfigurationError> {
        if let Some(adapter) = read(&self.overrides).get(&capability) {
            return Ok(adapter.clone());
        }
        if let Some(adapter) = read(&self.memo).get(&capability) {
            return Ok(adapter.clone());
        }

        let adapter = self.build(capability)?;

        // Another caller may have won the race; keep whichever landed first.
        let mut memo = write(&self.memo);
        Ok(memo.entry(capability).or_insert(adapter).clone())
    }

    fn build(&self, capability: Capability) -> Result<Adapter, ConfigurationError> {
        let registration = match self.config.active_registration(capability) {
            Some(registration) => registration,
            None => {
                return self.fallback(
                    capability,
                    ConfigurationError::NoActiveProvider { capability },
                )
            }
        };

        let built = ProviderKind::from_key(&registration.key)
            .ok_or_else(|| ConfigurationError::NotImplemented {
                capability,
                key: registration.key.clone(),
            })
            .and_then(|kind| kind.build(capability, self.config.as_ref()));

        match built {
            Ok(adapter) => {
                info!(
                    "Resolved {} to provider '{}' (cost per call {})",
                    capability, registration.key, registration.cost_per_call
                );
                let ctx = CallContext::new(capability, registration.key, registration.cost_per_call);
                Ok(adapter.instrument(ctx, self.meter.clone()))
            }
            Err(cause) => self.fallback(capability, cause),
        }
    }

    fn fallback(
        &self,
        capability: Capability,
        cause: ConfigurationError,
    ) -> Result<Adapter, ConfigurationError> {
        if !has_fallback(capability) {
            return Err(cause);
        }

        warn!("{}; using mock provider for {}", cause, capability);
        let adapter = ProviderKind::Mock.build(capability, self.config.as_ref())?;
        // every capability's mock is metered under the shared `mock` key
        let ctx = CallContext::new(capability, MOCK_PROVIDER_ID, Decimal::ZERO);
        Ok(adapter.instrument(ctx, self.meter.clone()))
    }

    /// Drops the memoized adapter for one capability, or for all when `None`.
    pub fn invalidate(&self, capability: Option<Capability>) {
        let mut memo = write(&self.memo);
        match capability {
            Some(capability) => {
                memo.remove(&capability);
                debug!("Invalidated resolver memo for {}", capability);
            }
            None => {
                memo.clear();
                debug!("Invalidated resolver memo for all capabilities");
            }
        }
    }

    /// Serves `adapter` for its capability until [`reset`](Self::reset).
    ///
    /// The override bypasses configuration and is not instrumented.
    pub fn override_adapter(&self, adapter: Adapter) {
        write(&self.overrides).insert(adapter.capability(), adapter);
    }

    /// Removes an override installed with [`override_adapter`](Self::override_adapter).
    pub fn reset(&self, capability: Capability) {
        write(&self.overrides).remove(&capability);
    }

    pub fn vehicle_lookup(&self) -> Result<Arc<dyn VehicleLookupProvider>, ConfigurationError> {
        match self.resolve(Capability::VehicleLookup)? {
            Adapter::VehicleLookup(p) => Ok(p),
            other => Err(mismatch(Capability::VehicleLookup, &other)),
        }
    }

    pub fn emissions(&self) -> Result<Arc<dyn EmissionsProvider>, ConfigurationError> {
        match self.resolve(Capability::Emissions)? {
            Adapter::Emissions(p) => Ok(p),
            other => Err(mismatch(Capability::Emissions, &other)),
        }
    }

    pub fn recalls(&self) -> Result<Arc<dyn RecallProvider>, ConfigurationError> {
        match self.resolve(Capability::Recalls)? {
            Adapter::Recalls(p) => Ok(p),
            other => Err(mismatch(Capability::Recalls, &other)),
        }
    }

    pub fn low_emission_class(
        &self,
    ) -> Result<Arc<dyn EmissionClassProvider>, ConfigurationError> {
        match self.resolve(Capability::LowEmissionClass)? {
            Adapter::LowEmissionClass(p) => Ok(p),
            other => Err(mismatch(Capability::LowEmissionClass, &other)),
        }
    }

    pub fn vin_decode(&self) -> Result<Arc<dyn VinDecoder>, ConfigurationError> {
        match self.resolve(Capability::VinDecode)? {
            Adapter::VinDecode(p) => Ok(p),
            other => Err(mismatch(Capability::VinDecode, &other)),
        }
    }

    pub fn identity(&self) -> Result<Arc<dyn IdentityProvider>, ConfigurationError> {
        match self.resolve(Capability::Identity)? {
            Adapter::Identity(p) => Ok(p),
            other => Err(mismatch(Capability::Identity, &other)),
        }
    }

    pub fn blob_storage(&self) -> Result<Arc<dyn BlobStorage>, ConfigurationError> {
        match self.resolve(Capability::BlobStorage)? {
            Adapter::BlobStorage(p) => Ok(p),
            other => Err(mismatch(Capability::BlobStorage, &other)),
        }
    }
}

fn mismatch(expected: Capability, actual: &Adapter) -> ConfigurationError {
    ConfigurationError::CapabilityMismatch {
        expected,
        actual: actual.capability(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InMemoryConfig, ProviderRegistration};
    use crate::constants::{TUNABLE_BLOB_STORAGE_ROOT, TUNABLE_IDENTITY_STATIC_TOKENS};
    use crate::telemetry::{InMemoryCallLog, MemoryAlertSink};
    use autofill_vehicle_data::{MockEmissions, VehicleIdentifier};
    use rust_decimal_macros::dec;

    fn resolver(config: Arc<InMemoryConfig>) -> (CapabilityResolver, Arc<InMemoryCallLog>) {
        let log = Arc::new(InMemoryCallLog::new());
        let meter = Arc::new(CallMeter::new(log.clone(), Arc::new(MemoryAlertSink::new())));
        (CapabilityResolver::new(config, meter), log)
    }

    #[test]
    fn test_fallback_capabilities_always_resolve() {
        let config = Arc::new(InMemoryConfig::new());
        config.upsert_registration(ProviderRegistration::active(
            Capability::Emissions,
            "carbon_api",
            dec!(0.1),
        ));
        // registered but missing its base URL
        config.upsert_registration(ProviderRegistration::active(
            Capability::VehicleLookup,
            "plate_registry",
            dec!(0.15),
        ));
        let (resolver, _) = resolver(config);

        for capability in [
            Capability::VehicleLookup,
            Capability::Emissions,
            Capability::Recalls,
            Capability::LowEmissionClass,
            Capability::VinDecode,
        ] {
            let adapter = resolver.resolve(capability).unwrap();
            assert_eq!(adapter.capability(), capability);
            assert_eq!(adapter.provider_id(), MOCK_PROVIDER_ID);
        }
    }

    #[test]
    fn test_infra_capabilities_report_configuration_errors() {
        let config = Arc::new(InMemoryConfig::new());
        let (resolver, _) = resolver(config.clone());

        assert_eq!(
            resolver.identity().err(),
            Some(ConfigurationError::NoActiveProvider {
                capability: Capability::Identity
            })
        );

        config.upsert_registration(ProviderRegistration::active(
            Capability::BlobStorage,
            "s3",
            dec!(0),
        ));
        assert_eq!(
            resolver.blob_storage().err(),
            Some(ConfigurationError::NotImplemented {
                capability: Capability::BlobStorage,
                key: "s3".to_string()
            })
        );

        config.upsert_registration(ProviderRegistration::active(
            Capability::Identity,
            "static_token",
            dec!(0),
        ));
        assert!(matches!(
            resolver.identity().err(),
            Some(ConfigurationError::MissingSetting { .. })
        ));
    }

    #[tokio::test]
    async fn test_infra_capabilities_resolve_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let config = Arc::new(InMemoryConfig::new());
        config.set_tunable(TUNABLE_IDENTITY_STATIC_TOKENS, "t0k3n:seller-42");
        config.set_tunable(TUNABLE_BLOB_STORAGE_ROOT, dir.path().to_string_lossy());
        config.upsert_registration(ProviderRegistration::active(
            Capability::Identity,
            "static_token",
            dec!(0),
        ));
        config.upsert_registration(ProviderRegistration::active(
            Capability::BlobStorage,
            "local_fs",
            dec!(0.001),
        ));
        let (resolver, log) = resolver(config);

        let identity = resolver.identity().unwrap();
        let principal = identity.verify("t0k3n").await.unwrap();
        assert_eq!(principal.map(|p| p.subject).as_deref(), Some("seller-42"));

        let storage = resolver.blob_storage().unwrap();
        storage.put("photos/front.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(storage.get("photos/front.jpg").await.unwrap(), Some(vec![1, 2, 3]));

        assert_eq!(log.records().len(), 3);
        assert_eq!(log.total_cost("local_fs"), dec!(0.002));
    }

    #[test]
    fn test_resolve_is_memoized_until_invalidated() {
        let config = Arc::new(InMemoryConfig::new());
        let (resolver, _) = resolver(config.clone());

        let first = resolver.resolve(Capability::LowEmissionClass).unwrap();
        let second = resolver.resolve(Capability::LowEmissionClass).unwrap();
        assert!(first.same_instance(&second));
        assert_eq!(first.provider_id(), MOCK_PROVIDER_ID);

        config.upsert_registration(ProviderRegistration::active(
            Capability::LowEmissionClass,
            "critair_rules",
            dec!(0),
        ));
        // still memoized
        assert_eq!(
            resolver.resolve(Capability::LowEmissionClass).unwrap().provider_id(),
            MOCK_PROVIDER_ID
        );

        resolver.invalidate(Some(Capability::LowEmissionClass));
        let third = resolver.resolve(Capability::LowEmissionClass).unwrap();
        assert!(!third.same_instance(&first));
        assert_eq!(third.provider_id(), "critair_rules");
    }

    #[test]
    fn test_invalidate_all() {
        let config = Arc::new(InMemoryConfig::new());
        let (resolver, _) = resolver(config);

        let recalls = resolver.resolve(Capability::Recalls).unwrap();
        let vin = resolver.resolve(Capability::VinDecode).unwrap();
        resolver.invalidate(None);

        assert!(!resolver.resolve(Capability::Recalls).unwrap().same_instance(&recalls));
        assert!(!resolver.resolve(Capability::VinDecode).unwrap().same_instance(&vin));
    }

    #[tokio::test]
    async fn test_override_and_reset() {
        let config = Arc::new(InMemoryConfig::new());
        let (resolver, log) = resolver(config);

        let direct: Arc<dyn EmissionsProvider> = Arc::new(MockEmissions);
        resolver.override_adapter(Adapter::Emissions(direct.clone()));
        let resolved = resolver.resolve(Capability::Emissions).unwrap();
        assert!(resolved.same_instance(&Adapter::Emissions(direct)));

        // overrides are not metered
        let query = autofill_vehicle_data::EmissionsQuery::new(
            &VehicleIdentifier::plate("AB-123-CD"),
            None,
        );
        resolver.emissions().unwrap().emissions(&query).await.unwrap();
        assert!(log.records().is_empty());

        resolver.reset(Capability::Emissions);
        resolver.emissions().unwrap().emissions(&query).await.unwrap();
        assert_eq!(log.records().len(), 1);
    }
}
