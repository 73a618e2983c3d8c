//! Metered wrapper around any capability implementation.

use std::sync::Arc;

use async_trait::async_trait;

use autofill_vehicle_data::provider::{
    BlobStorage, EmissionClassProvider, EmissionsProvider, IdentityProvider, Principal,
    RecallProvider, VehicleLookupProvider, VinDecoder,
};
use autofill_vehicle_data::{
    ClassificationQuery, EmissionClassification, EmissionsQuery, EmissionsReport, ProviderError,
    RecallQuery, RecallReport, VehicleIdentifier, VehicleRecord, VinQuery, VinSpecification,
};

use crate::telemetry::{CallContext, CallMeter};

/// Same contract as the wrapped provider; each call is recorded by the meter.
pub struct Instrumented<P: ?Sized> {
    inner: Arc<P>,
    ctx: CallContext,
    meter: Arc<CallMeter>,
}

impl<P: ?Sized> Instrumented<P> {
    pub fn new(inner: Arc<P>, ctx: CallContext, meter: Arc<CallMeter>) -> Self {
        Self { inner, ctx, meter }
    }

    pub fn context(&self) -> &CallContext {
        &self.ctx
    }
}

#[async_trait]
impl VehicleLookupProvider for Instrumented<dyn VehicleLookupProvider> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn lookup(&self, identifier: &VehicleIdentifier) -> Result<VehicleRecord, ProviderError> {
        self.meter
            .observe(&self.ctx, "lookup", self.inner.lookup(identifier))
            .await
    }
}

#[async_trait]
impl EmissionsProvider for Instrumented<dyn EmissionsProvider> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn emissions(&self, query: &EmissionsQuery) -> Result<EmissionsReport, ProviderError> {
        self.meter
            .observe(&self.ctx, "emissions", self.inner.emissions(query))
            .await
    }
}

#[async_trait]
impl RecallProvider for Instrumented<dyn RecallProvider> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn recalls(&self, query: &RecallQuery) -> Result<RecallReport, ProviderError> {
        self.meter
            .observe(&self.ctx, "recalls", self.inner.recalls(query))
            .await
    }
}

#[async_trait]
impl EmissionClassProvider for Instrumented<dyn EmissionClassProvider> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn classify(
        &self,
        query: &ClassificationQuery,
    ) -> Result<EmissionClassification, ProviderError> {
        self.meter
            .observe(&self.ctx, "classify", self.inner.classify(query))
            .await
    }
}

#[async_trait]
impl VinDecoder for Instrumented<dyn VinDecoder> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn decode(&self, query: &VinQuery) -> Result<VinSpecification, ProviderError> {
        self.meter
            .observe(&self.ctx, "decode", self.inner.decode(query))
            .await
    }
}

#[async_trait]
impl IdentityProvider for Instrumented<dyn IdentityProvider> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn verify(&self, token: &str) -> Result<Option<Principal>, ProviderError> {
        self.meter
            .observe(&self.ctx, "verify", self.inner.verify(token))
            .await
    }
}

#[async_trait]
impl BlobStorage for Instrumented<dyn BlobStorage> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), ProviderError> {
        self.meter
            .observe(&self.ctx, "put", self.inner.put(key, bytes))
            .await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        self.meter
            .observe(&self.ctx, "get", self.inner.get(key))
            .await
    }
}
