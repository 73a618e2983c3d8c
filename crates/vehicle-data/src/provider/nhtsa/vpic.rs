use async_trait::async_trait;
use serde::Deserialize;

use super::non_empty;
use crate::errors::ProviderError;
use crate::models::{VinQuery, VinSpecification};
use crate::provider::http::HttpClient;
use crate::provider::VinDecoder;

const PROVIDER_ID: &str = "nhtsa_vpic";
const BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValues";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DecodeResponse {
    #[serde(default)]
    results: Vec<DecodedVin>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DecodedVin {
    body_class: Option<String>,
    manufacturer: Option<String>,
    model_year: Option<String>,
    plant_country: Option<String>,
    engine_cylinders: Option<String>,
    #[serde(rename = "DisplacementL")]
    displacement_l: Option<String>,
    drive_type: Option<String>,
}

pub struct NhtsaVinDecoder {
    http: HttpClient,
    base_url: String,
}

impl NhtsaVinDecoder {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(PROVIDER_ID),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NhtsaVinDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VinDecoder for NhtsaVinDecoder {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        "NHTSA vPIC"
    }

    async fn decode(&self, query: &VinQuery) -> Result<VinSpecification, ProviderError> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(&query.vin));
        let response: DecodeResponse = self
            .http
            .get_json(&url, &[("format", "json".to_string())], &[])
            .await?;

        response
            .results
            .into_iter()
            .next()
            .map(into_specification)
            .ok_or_else(|| ProviderError::NotFound {
                provider: PROVIDER_ID.to_string(),
                subject: query.vin.clone(),
            })
    }
}

fn into_specification(decoded: DecodedVin) -> VinSpecification {
    VinSpecification {
        body_class: non_empty(decoded.body_class),
        manufacturer: non_empty(decoded.manufacturer),
        model_year: non_empty(decoded.model_year).and_then(|y| y.parse().ok()),
        plant_country: non_empty(decoded.plant_country),
        engine_cylinders: non_empty(decoded.engine_cylinders).and_then(|c| c.parse().ok()),
        displacement_liters: non_empty(decoded.displacement_l).and_then(|d| d.parse().ok()),
        drive_type: non_empty(decoded.drive_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_values_mapping() {
        let json = r#"{"Count": 1, "Results": [{
            "BodyClass": "Hatchback/Liftback/Notchback",
            "Manufacturer": "RENAULT S.A.",
            "ModelYear": "2021",
            "PlantCountry": "",
            "EngineCylinders": "3",
            "DisplacementL": "0.999",
            "DriveType": "Not Applicable"
        }]}"#;
        let response: DecodeResponse = serde_json::from_str(json).unwrap();
        let spec = into_specification(response.results.into_iter().next().unwrap());

        assert_eq!(spec.body_class.as_deref(), Some("Hatchback/Liftback/Notchback"));
        assert_eq!(spec.model_year, Some(2021));
        assert_eq!(spec.plant_country, None);
        assert_eq!(spec.engine_cylinders, Some(3));
        assert_eq!(spec.displacement_liters, Some(0.999));
        assert_eq!(spec.drive_type, None);
    }
}
