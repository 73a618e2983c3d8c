//! Provider trait definitions, one per capability.
//!
//! Every trait follows the same shape: a stable `id()` that matches the
//! provider key used in registrations, a display `name()` used for source
//! attribution, and a single typed async method.

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::models::{
    ClassificationQuery, EmissionClassification, EmissionsQuery, EmissionsReport, RecallQuery,
    RecallReport, VehicleIdentifier, VehicleRecord, VinQuery, VinSpecification,
};

/// Registry lookup by plate or VIN.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use autofill_vehicle_data::provider::VehicleLookupProvider;
///
/// struct MyRegistry;
///
/// #[async_trait]
/// impl VehicleLookupProvider for MyRegistry {
///     fn id(&self) -> &'static str {
///         "my_registry"
///     }
///
///     async fn lookup(
///         &self,
///         identifier: &VehicleIdentifier,
///     ) -> Result<VehicleRecord, ProviderError> {
///         // ... call the registry
///     }
/// }
/// ```
#[async_trait]
pub trait VehicleLookupProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "plate_registry". Used for logging,
    /// failure tracking and matching provider registrations.
    fn id(&self) -> &'static str;

    /// Human-readable name used as the source of certified fields.
    fn name(&self) -> &str {
        self.id()
    }

    /// Fetch the registry record for a vehicle.
    async fn lookup(&self, identifier: &VehicleIdentifier) -> Result<VehicleRecord, ProviderError>;
}

/// Emissions and energy label data.
#[async_trait]
pub trait EmissionsProvider: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &str {
        self.id()
    }

    async fn emissions(&self, query: &EmissionsQuery) -> Result<EmissionsReport, ProviderError>;
}

/// Manufacturer recall campaigns.
#[async_trait]
pub trait RecallProvider: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &str {
        self.id()
    }

    async fn recalls(&self, query: &RecallQuery) -> Result<RecallReport, ProviderError>;
}

/// Low-emission zone classification (Crit'Air).
#[async_trait]
pub trait EmissionClassProvider: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &str {
        self.id()
    }

    async fn classify(
        &self,
        query: &ClassificationQuery,
    ) -> Result<EmissionClassification, ProviderError>;
}

/// Technical decode of a 17-character VIN.
#[async_trait]
pub trait VinDecoder: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &str {
        self.id()
    }

    async fn decode(&self, query: &VinQuery) -> Result<VinSpecification, ProviderError>;
}

/// Authenticated caller returned by an identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

/// Infrastructure capability: verifies bearer tokens.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &str {
        self.id()
    }

    /// Returns the principal for a valid token, `None` for an unknown one.
    async fn verify(&self, token: &str) -> Result<Option<Principal>, ProviderError>;
}

/// Infrastructure capability: opaque blob storage (listing photos, documents).
#[async_trait]
pub trait BlobStorage: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &str {
        self.id()
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), ProviderError>;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProviderError>;
}
