//! Fallback ("mock") providers.
//!
//! These are used when no usable provider is registered for a capability.
//! They never touch the network and return a fixed, plausible vehicle so a
//! listing can still be pre-filled in development and during outages of the
//! configuration itself. They carry a cost of zero.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ProviderError;
use crate::models::{
    ClassificationQuery, EmissionClassification, EmissionsQuery, EmissionsReport, FuelType,
    RecallQuery, RecallReport, VehicleIdentifier, VehicleRecord, VinQuery, VinSpecification,
};
use crate::provider::{
    EmissionClassProvider, EmissionsProvider, RecallProvider, VehicleLookupProvider, VinDecoder,
};

/// Provider key shared by every fallback implementation.
pub const MOCK_PROVIDER_ID: &str = "mock";

const MOCK_VIN: &str = "VF3UPHNSKL1234567";

#[derive(Clone, Copy, Debug, Default)]
pub struct MockVehicleLookup;

#[async_trait]
impl VehicleLookupProvider for MockVehicleLookup {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Mock vehicle registry"
    }

    async fn lookup(&self, identifier: &VehicleIdentifier) -> Result<VehicleRecord, ProviderError> {
        Ok(VehicleRecord {
            make: Some("Peugeot".to_string()),
            model: Some("208".to_string()),
            variant: Some("1.2 PureTech 100 Allure".to_string()),
            vin: Some(identifier.as_vin().unwrap_or(MOCK_VIN).to_string()),
            first_registration_date: NaiveDate::from_ymd_opt(2020, 3, 12),
            fuel_type: Some(FuelType::Petrol),
            transmission: Some("manual".to_string()),
            body_type: Some("hatchback".to_string()),
            color: Some("grey".to_string()),
            doors: Some(5),
            seats: Some(5),
            fiscal_horsepower: Some(5),
            power_kw: Some(74),
            euro_standard: Some(6),
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MockEmissions;

#[async_trait]
impl EmissionsProvider for MockEmissions {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Mock emissions"
    }

    async fn emissions(&self, _query: &EmissionsQuery) -> Result<EmissionsReport, ProviderError> {
        Ok(EmissionsReport {
            energy_class: Some("B".to_string()),
            co2_grams_per_km: Some(112),
            fuel_consumption_mixed: Some(4.9),
            euro_standard: Some(6),
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MockRecalls;

#[async_trait]
impl RecallProvider for MockRecalls {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Mock recalls"
    }

    async fn recalls(&self, _query: &RecallQuery) -> Result<RecallReport, ProviderError> {
        Ok(RecallReport::default())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MockEmissionClass;

#[async_trait]
impl EmissionClassProvider for MockEmissionClass {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Mock Crit'Air"
    }

    async fn classify(
        &self,
        _query: &ClassificationQuery,
    ) -> Result<EmissionClassification, ProviderError> {
        Ok(EmissionClassification::level(1))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MockVinDecoder;

#[async_trait]
impl VinDecoder for MockVinDecoder {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Mock VIN decoder"
    }

    async fn decode(&self, _query: &VinQuery) -> Result<VinSpecification, ProviderError> {
        Ok(VinSpecification {
            body_class: Some("Hatchback/Liftback/Notchback".to_string()),
            manufacturer: Some("PSA Automobiles SA".to_string()),
            model_year: Some(2020),
            plant_country: Some("FRANCE".to_string()),
            engine_cylinders: Some(3),
            displacement_liters: Some(1.2),
            drive_type: Some("FWD/Front-Wheel Drive".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_lookup_echoes_vin_identifier() {
        let record = MockVehicleLookup
            .lookup(&VehicleIdentifier::vin("WVWZZZ1JZXW000001"))
            .await
            .unwrap();
        assert_eq!(record.vin.as_deref(), Some("WVWZZZ1JZXW000001"));

        let record = MockVehicleLookup
            .lookup(&VehicleIdentifier::plate("AB-123-CD"))
            .await
            .unwrap();
        assert_eq!(record.vin.as_deref(), Some(MOCK_VIN));
    }

    #[test]
    fn test_mock_ids_are_shared() {
        assert_eq!(VehicleLookupProvider::id(&MockVehicleLookup), "mock");
        assert_eq!(EmissionsProvider::id(&MockEmissions), "mock");
        assert_eq!(VinDecoder::id(&MockVinDecoder), "mock");
    }
}
