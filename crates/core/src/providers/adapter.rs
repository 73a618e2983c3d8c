use std::sync::Arc;

use autofill_vehicle_data::provider::{
    BlobStorage, EmissionClassProvider, EmissionsProvider, IdentityProvider, RecallProvider,
    VehicleLookupProvider, VinDecoder,
};
use autofill_vehicle_data::Capability;

use super::Instrumented;
use crate::telemetry::{CallContext, CallMeter};

/// A resolved implementation, tagged with the capability it serves.
#[derive(Clone)]
pub enum Adapter {
    VehicleLookup(Arc<dyn VehicleLookupProvider>),
    Emissions(Arc<dyn EmissionsProvider>),
    Recalls(Arc<dyn RecallProvider>),
    LowEmissionClass(Arc<dyn EmissionClassProvider>),
    VinDecode(Arc<dyn VinDecoder>),
    Identity(Arc<dyn IdentityProvider>),
    BlobStorage(Arc<dyn BlobStorage>),
}

impl Adapter {
    pub fn capability(&self) -> Capability {
        match self {
            Self::VehicleLookup(_) => Capability::VehicleLookup,
            Self::Emissions(_) => Capability::Emissions,
            Self::Recalls(_) => Capability::Recalls,
            Self::LowEmissionClass(_) => Capability::LowEmissionClass,
            Self::VinDecode(_) => Capability::VinDecode,
            Self::Identity(_) => Capability::Identity,
            Self::BlobStorage(_) => Capability::BlobStorage,
        }
    }

    pub fn provider_id(&self) -> &'static str {
        match self {
            Self::VehicleLookup(p) => p.id(),
            Self::Emissions(p) => p.id(),
            Self::Recalls(p) => p.id(),
            Self::LowEmissionClass(p) => p.id(),
            Self::VinDecode(p) => p.id(),
            Self::Identity(p) => p.id(),
            Self::BlobStorage(p) => p.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::VehicleLookup(p) => p.name(),
            Self::Emissions(p) => p.name(),
            Self::Recalls(p) => p.name(),
            Self::LowEmissionClass(p) => p.name(),
            Self::VinDecode(p) => p.name(),
            Self::Identity(p) => p.name(),
            Self::BlobStorage(p) => p.name(),
        }
    }

    /// True when both adapters point at the same underlying instance.
    pub fn same_instance(&self, other: &Adapter) -> bool {
        self.data_ptr() == other.data_ptr()
    }

    fn data_ptr(&self) -> *const () {
        match self {
            Self::VehicleLookup(p) => Arc::as_ptr(p) as *const (),
            Self::Emissions(p) => Arc::as_ptr(p) as *const (),
            Self::Recalls(p) => Arc::as_ptr(p) as *const (),
            Self::LowEmissionClass(p) => Arc::as_ptr(p) as *const (),
            Self::VinDecode(p) => Arc::as_ptr(p) as *const (),
            Self::Identity(p) => Arc::as_ptr(p) as *const (),
            Self::BlobStorage(p) => Arc::as_ptr(p) as *const (),
        }
    }

    /// Wraps the adapter so every call is metered under `ctx`.
    pub fn instrument(self, ctx: CallContext, meter: Arc<CallMeter>) -> Adapter {
        match self {
            Self::VehicleLookup(p) => Self::VehicleLookup(Arc::new(Instrumented::new(p, ctx, meter))),
            Self::Emissions(p) => Self::Emissions(Arc::new(Instrumented::new(p, ctx, meter))),
            Self::Recalls(p) => Self::Recalls(Arc::new(Instrumented::new(p, ctx, meter))),
            Self::LowEmissionClass(p) => {
                Self::LowEmissionClass(Arc::new(Instrumented::new(p, ctx, meter)))
            }
            Self::VinDecode(p) => Self::VinDecode(Arc::new(Instrumented::new(p, ctx, meter))),
            Self::Identity(p) => Self::Identity(Arc::new(Instrumented::new(p, ctx, meter))),
            Self::BlobStorage(p) => Self::BlobStorage(Arc::new(Instrumented::new(p, ctx, meter))),
        }
    }
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("capability", &self.capability())
            .field("provider", &self.provider_id())
            .finish()
    }
}
