//! Known provider keys and how to build them.

use std::sync::Arc;

use autofill_vehicle_data::{
    AdemeEmissionsProvider, Capability, CritAirRulesProvider, LocalFsBlobStorage,
    MockEmissionClass, MockEmissions, MockRecalls, MockVehicleLookup, MockVinDecoder,
    NhtsaRecallProvider, NhtsaVinDecoder, PlateRegistryProvider, StaticTokenIdentity,
};

use super::Adapter;
use crate::config::ConfigSnapshot;
use crate::constants::{
    TUNABLE_ADEME_BASE_URL, TUNABLE_BLOB_STORAGE_ROOT, TUNABLE_IDENTITY_STATIC_TOKENS,
    TUNABLE_PLATE_REGISTRY_API_KEY, TUNABLE_PLATE_REGISTRY_BASE_URL,
};
use crate::errors::ConfigurationError;

/// Closed set of provider keys this build knows how to instantiate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    PlateRegistry,
    Ademe,
    NhtsaRecalls,
    CritAirRules,
    NhtsaVpic,
    StaticToken,
    LocalFs,
    Mock,
}

/// Which key may back which capability.
static PROVIDER_TABLE: &[(Capability, ProviderKind)] = &[
    (Capability::VehicleLookup, ProviderKind::PlateRegistry),
    (Capability::VehicleLookup, ProviderKind::Mock),
    (Capability::Emissions, ProviderKind::Ademe),
    (Capability::Emissions, ProviderKind::Mock),
    (Capability::Recalls, ProviderKind::NhtsaRecalls),
    (Capability::Recalls, ProviderKind::Mock),
    (Capability::LowEmissionClass, ProviderKind::CritAirRules),
    (Capability::LowEmissionClass, ProviderKind::Mock),
    (Capability::VinDecode, ProviderKind::NhtsaVpic),
    (Capability::VinDecode, ProviderKind::Mock),
    (Capability::Identity, ProviderKind::StaticToken),
    (Capability::BlobStorage, ProviderKind::LocalFs),
];

impl ProviderKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::PlateRegistry => "plate_registry",
            Self::Ademe => "ademe",
            Self::NhtsaRecalls => "nhtsa_recalls",
            Self::CritAirRules => "critair_rules",
            Self::NhtsaVpic => "nhtsa_vpic",
            Self::StaticToken => "static_token",
            Self::LocalFs => "local_fs",
            Self::Mock => "mock",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [
            Self::PlateRegistry,
            Self::Ademe,
            Self::NhtsaRecalls,
            Self::CritAirRules,
            Self::NhtsaVpic,
            Self::StaticToken,
            Self::LocalFs,
            Self::Mock,
        ]
        .into_iter()
        .find(|kind| kind.key() == key)
    }

    pub fn supports(&self, capability: Capability) -> bool {
        PROVIDER_TABLE
            .iter()
            .any(|(c, kind)| *c == capability && kind == self)
    }

    /// Builds the raw (uninstrumented) implementation of `capability` for this key.
    pub(crate) fn build(
        &self,
        capability: Capability,
        config: &dyn ConfigSnapshot,
    ) -> Result<Adapter, ConfigurationError> {
        if !self.supports(capability) {
            return Err(ConfigurationError::NotImplemented {
                capability,
                key: self.key().to_string(),
            });
        }

        let setting = |name: &str| {
            config
                .tunable(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigurationError::MissingSetting {
                    capability,
                    key: self.key().to_string(),
                    setting: name.to_string(),
                })
        };

        let adapter = match (capability, self) {
            (Capability::VehicleLookup, Self::PlateRegistry) => {
                let base_url = setting(TUNABLE_PLATE_REGISTRY_BASE_URL)?;
                let api_key = setting(TUNABLE_PLATE_REGISTRY_API_KEY)?;
                Adapter::VehicleLookup(Arc::new(PlateRegistryProvider::new(base_url, api_key)))
            }
            (Capability::Emissions, Self::Ademe) => {
                let base_url = setting(TUNABLE_ADEME_BASE_URL)?;
                Adapter::Emissions(Arc::new(AdemeEmissionsProvider::new(base_url)))
            }
            (Capability::Recalls, Self::NhtsaRecalls) => {
                Adapter::Recalls(Arc::new(NhtsaRecallProvider::new()))
            }
            (Capability::LowEmissionClass, Self::CritAirRules) => {
                Adapter::LowEmissionClass(Arc::new(CritAirRulesProvider::new()))
            }
            (Capability::VinDecode, Self::NhtsaVpic) => {
                Adapter::VinDecode(Arc::new(NhtsaVinDecoder::new()))
            }
            (Capability::Identity, Self::StaticToken) => {
                let spec = setting(TUNABLE_IDENTITY_STATIC_TOKENS)?;
                Adapter::Identity(Arc::new(StaticTokenIdentity::from_spec(&spec)))
            }
            (Capability::BlobStorage, Self::LocalFs) => {
                let root = setting(TUNABLE_BLOB_STORAGE_ROOT)?;
                Adapter::BlobStorage(Arc::new(LocalFsBlobStorage::new(root)))
            }
            (capability, Self::Mock) => mock_adapter(capability).ok_or_else(|| {
                ConfigurationError::NotImplemented {
                    capability,
                    key: self.key().to_string(),
                }
            })?,
            (capability, kind) => {
                return Err(ConfigurationError::NotImplemented {
                    capability,
                    key: kind.key().to_string(),
                })
            }
        };

        Ok(adapter)
    }
}

/// Whether a capability can fall back to a mock implementation.
pub fn has_fallback(capability: Capability) -> bool {
    ProviderKind::Mock.supports(capability)
}

fn mock_adapter(capability: Capability) -> Option<Adapter> {
    let adapter = match capability {
        Capability::VehicleLookup => Adapter::VehicleLookup(Arc::new(MockVehicleLookup)),
        Capability::Emissions => Adapter::Emissions(Arc::new(MockEmissions)),
        Capability::Recalls => Adapter::Recalls(Arc::new(MockRecalls)),
        Capability::LowEmissionClass => Adapter::LowEmissionClass(Arc::new(MockEmissionClass)),
        Capability::VinDecode => Adapter::VinDecode(Arc::new(MockVinDecoder)),
        Capability::Identity | Capability::BlobStorage => return None,
    };
    Some(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfig;

    #[test]
    fn test_key_round_trip() {
        for kind in [
            ProviderKind::PlateRegistry,
            ProviderKind::Ademe,
            ProviderKind::NhtsaRecalls,
            ProviderKind::CritAirRules,
            ProviderKind::NhtsaVpic,
            ProviderKind::StaticToken,
            ProviderKind::LocalFs,
            ProviderKind::Mock,
        ] {
            assert_eq!(ProviderKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ProviderKind::from_key("carfax"), None);
    }

    #[test]
    fn test_fallback_only_for_data_capabilities() {
        assert!(has_fallback(Capability::VehicleLookup));
        assert!(has_fallback(Capability::VinDecode));
        assert!(!has_fallback(Capability::Identity));
        assert!(!has_fallback(Capability::BlobStorage));
    }

    #[test]
    fn test_build_rejects_wrong_capability() {
        let config = InMemoryConfig::new();
        let result = ProviderKind::Ademe.build(Capability::Recalls, &config);
        assert!(matches!(
            result,
            Err(ConfigurationError::NotImplemented { capability: Capability::Recalls, .. })
        ));
    }

    #[test]
    fn test_build_reports_missing_setting() {
        let config = InMemoryConfig::new();
        config.set_tunable(TUNABLE_PLATE_REGISTRY_BASE_URL, "https://registry.example.com");

        match ProviderKind::PlateRegistry.build(Capability::VehicleLookup, &config) {
            Err(ConfigurationError::MissingSetting { setting, .. }) => {
                assert_eq!(setting, TUNABLE_PLATE_REGISTRY_API_KEY)
            }
            other => panic!("expected missing setting, got {:?}", other.map(|a| a.provider_id())),
        }

        config.set_tunable(TUNABLE_PLATE_REGISTRY_API_KEY, "secret");
        let adapter = ProviderKind::PlateRegistry
            .build(Capability::VehicleLookup, &config)
            .unwrap();
        assert_eq!(adapter.provider_id(), "plate_registry");
    }
}
