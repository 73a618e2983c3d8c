use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use autofill_vehicle_data::provider::{
    EmissionClassProvider, EmissionsProvider, RecallProvider, VehicleLookupProvider, VinDecoder,
};
use autofill_vehicle_data::{
    Capability, ClassificationQuery, EmissionsQuery, ProviderError, RecallQuery,
    VehicleIdentifier, VinQuery, VinSpecification,
};

use super::autofill_model::{
    AutofillRequest, AutofillResult, CertifiedFieldResult, FetchStatus, SourceStatus,
};
use super::autofill_traits::AutofillServiceTrait;
use super::extraction::{FieldCollector, FieldSource};
use super::validation::validate_request;
use crate::audit::{AuditRecord, AuditSink};
use crate::cache::{CacheKey, ResponseCache};
use crate::constants::{AUDIT_ACTION_AUTOFILL, CACHE_PROVIDER_KEY, TEMP_LISTING_PREFIX};
use crate::errors::{ConfigurationError, Result};
use crate::listings::{CertifiedField, CertifiedFieldStore};
use crate::providers::CapabilityResolver;

/// Key and display name of a resolved provider.
trait ProviderLabel {
    fn key(&self) -> &'static str;
    fn label(&self) -> &str;
}

macro_rules! provider_label {
    ($($provider:ident),*) => {
        $(
            impl ProviderLabel for dyn $provider {
                fn key(&self) -> &'static str {
                    self.id()
                }

                fn label(&self) -> &str {
                    self.name()
                }
            }
        )*
    };
}

provider_label!(
    VehicleLookupProvider,
    EmissionsProvider,
    RecallProvider,
    EmissionClassProvider,
    VinDecoder
);

/// Result of fetching one capability.
struct Fetched<T> {
    status: SourceStatus,
    value: Option<T>,
    /// Attribution used for the extracted fields.
    source: String,
}

impl<T> Fetched<T> {
    fn cached(capability: Capability, value: T) -> Self {
        Self {
            status: SourceStatus {
                capability,
                provider_key: CACHE_PROVIDER_KEY.to_string(),
                status: FetchStatus::Cached,
                response_time_ms: None,
                error_message: None,
            },
            value: Some(value),
            source: format!("cache ({})", capability),
        }
    }

    fn failed(
        capability: Capability,
        provider_key: &str,
        response_time_ms: Option<u64>,
        error: &ProviderError,
    ) -> Self {
        Self {
            status: SourceStatus {
                capability,
                provider_key: provider_key.to_string(),
                status: FetchStatus::Failed,
                response_time_ms,
                error_message: Some(error.to_string()),
            },
            value: None,
            source: String::new(),
        }
    }

    fn is_cache_hit(&self) -> bool {
        self.status.status == FetchStatus::Cached
    }

    fn is_usable(&self) -> bool {
        self.value.is_some()
    }
}

/// Orchestrates one auto-fill run across all data capabilities.
pub struct AutofillService {
    resolver: Arc<CapabilityResolver>,
    cache: Arc<ResponseCache>,
    fields: Arc<dyn CertifiedFieldStore>,
    audit: Arc<dyn AuditSink>,
}

impl AutofillService {
    pub fn new(
        resolver: Arc<CapabilityResolver>,
        cache: Arc<ResponseCache>,
        fields: Arc<dyn CertifiedFieldStore>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            resolver,
            cache,
            fields,
            audit,
        }
    }

    pub fn resolver(&self) -> &Arc<CapabilityResolver> {
        &self.resolver
    }

    /// Cache check, then live call with cache write on success.
    ///
    /// Provider errors become a failed status; only resolution errors are returned.
    async fn fetch<T, P, R, C, Fut>(
        &self,
        identifier: &VehicleIdentifier,
        capability: Capability,
        resolve: R,
        call: C,
    ) -> std::result::Result<Fetched<T>, ConfigurationError>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
        P: ProviderLabel + Send + Sync + ?Sized,
        R: FnOnce(&CapabilityResolver) -> std::result::Result<Arc<P>, ConfigurationError>,
        C: FnOnce(Arc<P>) -> Fut,
        Fut: Future<Output = std::result::Result<T, ProviderError>> + Send,
    {
        let key = CacheKey::new(identifier, capability);
        if let Some(value) = self.cache.get::<T>(&key).await {
            debug!("Cache hit for {} on {}", capability, identifier);
            return Ok(Fetched::cached(capability, value));
        }

        let provider = resolve(self.resolver.as_ref())?;
        let started = Instant::now();
        let result = call(provider.clone()).await;
        let elapsed = started.elapsed().as_millis() as u64;

        match result {
            Ok(value) => {
                self.spawn_cache_write(key, value.clone());
                Ok(Fetched {
                    status: SourceStatus {
                        capability,
                        provider_key: provider.key().to_string(),
                        status: FetchStatus::Success,
                        response_time_ms: Some(elapsed),
                        error_message: None,
                    },
                    value: Some(value),
                    source: provider.label().to_string(),
                })
            }
            Err(e) => {
                warn!(
                    "{} via '{}' failed for {}: {}",
                    capability,
                    provider.key(),
                    identifier,
                    e
                );
                Ok(Fetched::failed(capability, provider.key(), Some(elapsed), &e))
            }
        }
    }

    /// Detached; the response does not wait for the write.
    fn spawn_cache_write<T>(&self, key: CacheKey, value: T)
    where
        T: Serialize + Send + Sync + 'static,
    {
        let cache = self.cache.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set(&key, &value).await {
                warn!("Failed to cache {} response: {}", key.capability, e);
            }
        });
    }

    async fn decode_vin(
        &self,
        identifier: &VehicleIdentifier,
        vin: Option<String>,
    ) -> std::result::Result<Fetched<VinSpecification>, ConfigurationError> {
        let Some(vin) = vin else {
            let decoder = self.resolver.vin_decode()?;
            let error = ProviderError::InsufficientData("no VIN available to decode".to_string());
            debug!("Skipping VIN decode for {}: {}", identifier, error);
            return Ok(Fetched::failed(Capability::VinDecode, decoder.key(), None, &error));
        };

        let query = VinQuery { vin };
        self.fetch(
            identifier,
            Capability::VinDecode,
            CapabilityResolver::vin_decode,
            move |p: Arc<dyn VinDecoder>| async move { p.decode(&query).await },
        )
        .await
    }

    async fn persist(&self, listing_id: &str, fields: &[CertifiedFieldResult]) {
        let now = Utc::now();
        for field in fields {
            let record = CertifiedField {
                listing_id: listing_id.to_string(),
                field_name: field.field_name.clone(),
                field_value: field.field_value.clone(),
                source: field.source.clone(),
                source_timestamp: now,
                is_certified: field.is_certified,
            };
            if let Err(e) = self.fields.upsert(&record).await {
                warn!(
                    "Failed to store field '{}' for listing {}: {}",
                    field.field_name, listing_id, e
                );
            }
        }
    }
}

fn collect<T: FieldSource>(collector: &mut FieldCollector, fetched: &Fetched<T>) {
    if let Some(value) = &fetched.value {
        collector.collect(value, &fetched.source);
    }
}

#[async_trait]
impl AutofillServiceTrait for AutofillService {
    async fn autofill(&self, request: AutofillRequest) -> Result<AutofillResult> {
        let identifier = validate_request(&request)?;
        debug!("Auto-fill requested for {}", identifier);

        let lookup_id = identifier.clone();
        let primary = self
            .fetch(
                &identifier,
                Capability::VehicleLookup,
                CapabilityResolver::vehicle_lookup,
                move |p: Arc<dyn VehicleLookupProvider>| async move { p.lookup(&lookup_id).await },
            )
            .await?;

        let vehicle = primary.value.as_ref();
        let emissions_query = EmissionsQuery::new(&identifier, vehicle);
        let recall_query = RecallQuery::new(&identifier, vehicle);
        let class_query = ClassificationQuery::new(&identifier, vehicle);
        let vin = identifier
            .as_vin()
            .map(str::to_string)
            .or_else(|| vehicle.and_then(|v| v.vin.clone()));

        let (emissions, recalls, classification, vin_spec) = tokio::join!(
            self.fetch(
                &identifier,
                Capability::Emissions,
                CapabilityResolver::emissions,
                move |p: Arc<dyn EmissionsProvider>| async move {
                    p.emissions(&emissions_query).await
                },
            ),
            self.fetch(
                &identifier,
                Capability::Recalls,
                CapabilityResolver::recalls,
                move |p: Arc<dyn RecallProvider>| async move { p.recalls(&recall_query).await },
            ),
            self.fetch(
                &identifier,
                Capability::LowEmissionClass,
                CapabilityResolver::low_emission_class,
                move |p: Arc<dyn EmissionClassProvider>| async move {
                    p.classify(&class_query).await
                },
            ),
            self.decode_vin(&identifier, vin),
        );
        let (emissions, recalls, classification, vin_spec) =
            (emissions?, recalls?, classification?, vin_spec?);

        let mut collector = FieldCollector::new();
        collect(&mut collector, &primary);
        collect(&mut collector, &emissions);
        collect(&mut collector, &recalls);
        collect(&mut collector, &classification);
        collect(&mut collector, &vin_spec);
        let fields = collector.into_fields();

        let usable = [
            primary.is_usable(),
            emissions.is_usable(),
            recalls.is_usable(),
            classification.is_usable(),
            vin_spec.is_usable(),
        ];
        let cache_hits = [
            primary.is_cache_hit(),
            emissions.is_cache_hit(),
            recalls.is_cache_hit(),
            classification.is_cache_hit(),
            vin_spec.is_cache_hit(),
        ]
        .iter()
        .filter(|hit| **hit)
        .count();

        let sources = vec![
            primary.status,
            emissions.status,
            recalls.status,
            classification.status,
            vin_spec.status,
        ];

        let listing_id = format!("{}{}", TEMP_LISTING_PREFIX, Uuid::new_v4());
        self.persist(&listing_id, &fields).await;

        let audit = AuditRecord {
            action: AUDIT_ACTION_AUTOFILL.to_string(),
            identifier_type: identifier.kind,
            listing_id: listing_id.clone(),
            fields_extracted: fields.len(),
            sources_attempted: sources.len(),
            successes: usable.iter().filter(|ok| **ok).count(),
            cache_hits,
            created_at: Utc::now(),
        };
        if let Err(e) = self.audit.append(&audit).await {
            warn!("Failed to write auto-fill audit record: {}", e);
        }

        info!(
            "Auto-fill for {} produced {} fields from {}/{} sources ({} cached)",
            identifier.kind,
            fields.len(),
            audit.successes,
            audit.sources_attempted,
            cache_hits
        );

        Ok(AutofillResult {
            listing_id,
            fields,
            sources,
        })
    }
}
