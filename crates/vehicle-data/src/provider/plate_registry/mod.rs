//! Vehicle registry adapter (plate / VIN lookup).
//!
//! Talks to a commercial registration-data API exposing:
//! - `GET {base}/vehicles/plate/{plate}`
//! - `GET {base}/vehicles/vin/{vin}`
//!
//! Both return the same JSON document. Authentication is an `X-Api-Key` header.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{FuelType, IdentifierType, VehicleIdentifier, VehicleRecord};
use crate::provider::http::HttpClient;
use crate::provider::VehicleLookupProvider;

const PROVIDER_ID: &str = "plate_registry";

/// Registry API response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryResponse {
    make: Option<String>,
    model: Option<String>,
    version: Option<String>,
    vin: Option<String>,
    /// ISO date (YYYY-MM-DD)
    first_registration_date: Option<String>,
    energy: Option<String>,
    gearbox: Option<String>,
    body: Option<String>,
    color: Option<String>,
    doors: Option<u8>,
    seats: Option<u8>,
    fiscal_power: Option<u16>,
    power_kw: Option<u16>,
    /// e.g. "EURO6D", "EURO 5"
    euro_norm: Option<String>,
}

/// Registration-data API provider.
pub struct PlateRegistryProvider {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl PlateRegistryProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(PROVIDER_ID),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url_for(&self, identifier: &VehicleIdentifier) -> String {
        let segment = match identifier.kind {
            IdentifierType::Plate => "plate",
            IdentifierType::Vin => "vin",
        };
        format!(
            "{}/vehicles/{}/{}",
            self.base_url,
            segment,
            urlencoding::encode(&identifier.value)
        )
    }
}

#[async_trait]
impl VehicleLookupProvider for PlateRegistryProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Vehicle registry"
    }

    async fn lookup(&self, identifier: &VehicleIdentifier) -> Result<VehicleRecord, ProviderError> {
        let url = self.url_for(identifier);
        let response: RegistryResponse = self
            .http
            .get_json(&url, &[], &[("X-Api-Key", self.api_key.as_str())])
            .await?;

        if response.make.is_none() && response.model.is_none() {
            return Err(ProviderError::NotFound {
                provider: PROVIDER_ID.to_string(),
                subject: identifier.value.clone(),
            });
        }

        Ok(into_record(response))
    }
}

fn into_record(response: RegistryResponse) -> VehicleRecord {
    VehicleRecord {
        make: response.make,
        model: response.model,
        variant: response.version,
        vin: response.vin.map(|v| v.trim().to_uppercase()),
        first_registration_date: response
            .first_registration_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        fuel_type: response.energy.as_deref().map(FuelType::from_label),
        transmission: response.gearbox,
        body_type: response.body,
        color: response.color,
        doors: response.doors,
        seats: response.seats,
        fiscal_horsepower: response.fiscal_power,
        power_kw: response.power_kw,
        euro_standard: response.euro_norm.as_deref().and_then(parse_euro_norm),
    }
}

/// Extracts the Euro standard number from labels like "EURO6D-TEMP" or "Euro 5".
pub(crate) fn parse_euro_norm(label: &str) -> Option<u8> {
    let upper = label.to_ascii_uppercase();
    let rest = upper.trim().strip_prefix("EURO")?.trim_start();
    rest.chars().next()?.to_digit(10).map(|d| d as u8)
}
