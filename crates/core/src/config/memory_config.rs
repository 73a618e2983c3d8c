//! In-memory, mutable configuration snapshot.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{info, warn};

use autofill_vehicle_data::Capability;

use super::{ConfigSnapshot, ProviderConfigFile, ProviderRegistration, RegistrationStatus};

/// Configuration held in memory.
///
/// Mutations do not notify anyone. Callers that change registrations must
/// invalidate the resolver afterwards.
#[derive(Default)]
pub struct InMemoryConfig {
    registrations: RwLock<Vec<ProviderRegistration>>,
    tunables: RwLock<HashMap<String, String>>,
}

impl InMemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(file: ProviderConfigFile) -> Self {
        let config = Self::new();
        for registration in file.registrations {
            config.upsert_registration(registration);
        }
        for (key, value) in file.tunables {
            config.set_tunable(key, value);
        }
        config
    }

    /// Parses the JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: ProviderConfigFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    fn read_registrations(&self) -> RwLockReadGuard<'_, Vec<ProviderRegistration>> {
        self.registrations.read().unwrap_or_else(|poisoned| {
            warn!("Registration lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_registrations(&self) -> RwLockWriteGuard<'_, Vec<ProviderRegistration>> {
        self.registrations.write().unwrap_or_else(|poisoned| {
            warn!("Registration lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Inserts or replaces the registration for `(capability, key)`.
    ///
    /// Activating a registration deactivates every other registration of the
    /// same capability, so at most one is active at a time.
    pub fn upsert_registration(&self, registration: ProviderRegistration) {
        let mut registrations = self.write_registrations();

        if registration.is_active() {
            for existing in registrations
                .iter_mut()
                .filter(|r| r.capability == registration.capability)
            {
                existing.status = RegistrationStatus::Inactive;
            }
        }

        registrations
            .retain(|r| !(r.capability == registration.capability && r.key == registration.key));
        info!(
            "Provider registration {} -> {} ({:?})",
            registration.capability, registration.key, registration.status
        );
        registrations.push(registration);
    }

    /// Marks every registration of a capability inactive.
    pub fn deactivate(&self, capability: Capability) {
        let mut registrations = self.write_registrations();
        for registration in registrations
            .iter_mut()
            .filter(|r| r.capability == capability)
        {
            registration.status = RegistrationStatus::Inactive;
        }
    }

    pub fn set_tunable(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut tunables = self.tunables.write().unwrap_or_else(|poisoned| {
            warn!("Tunables lock was poisoned, recovering");
            poisoned.into_inner()
        });
        tunables.insert(key.into(), value.into());
    }

    pub fn registrations(&self) -> Vec<ProviderRegistration> {
        self.read_registrations().clone()
    }
}

impl ConfigSnapshot for InMemoryConfig {
    fn active_registration(&self, capability: Capability) -> Option<ProviderRegistration> {
        self.read_registrations()
            .iter()
            .find(|r| r.capability == capability && r.is_active())
            .cloned()
    }

    fn tunable(&self, key: &str) -> Option<String> {
        let tunables = self.tunables.read().unwrap_or_else(|poisoned| {
            warn!("Tunables lock was poisoned, recovering");
            poisoned.into_inner()
        });
        tunables.get(key).cloned()
    }
}
