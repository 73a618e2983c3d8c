//! ADEME car-labelling emissions adapter.
//!
//! Queries a search endpoint over the ADEME vehicle emissions dataset:
//! `GET {base}/emissions?make=..&model=..&energy=..&year=..`, returning the
//! best matching homologation entries first.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{EmissionsQuery, EmissionsReport};
use crate::provider::http::HttpClient;
use crate::provider::plate_registry::parse_euro_norm;
use crate::provider::EmissionsProvider;

const PROVIDER_ID: &str = "ademe";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<EmissionsEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmissionsEntry {
    energy_class: Option<String>,
    /// g/km, WLTP
    co2: Option<u32>,
    mixed_consumption: Option<f64>,
    euro_norm: Option<String>,
}

pub struct AdemeEmissionsProvider {
    http: HttpClient,
    base_url: String,
}

impl AdemeEmissionsProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(PROVIDER_ID),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl EmissionsProvider for AdemeEmissionsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        "ADEME"
    }

    async fn emissions(&self, query: &EmissionsQuery) -> Result<EmissionsReport, ProviderError> {
        let (make, model) = match (&query.make, &query.model) {
            (Some(make), Some(model)) => (make.clone(), model.clone()),
            _ => {
                return Err(ProviderError::InsufficientData(
                    "make and model are required for an emissions search".to_string(),
                ))
            }
        };

        let mut params = vec![("make", make.clone()), ("model", model.clone())];
        if let Some(fuel) = query.fuel_type {
            params.push(("energy", fuel.as_str().to_string()));
        }
        if let Some(year) = query.year {
            params.push(("year", year.to_string()));
        }

        let url = format!("{}/emissions", self.base_url);
        let response: SearchResponse = self.http.get_json(&url, &params, &[]).await?;

        response
            .results
            .into_iter()
            .next()
            .map(into_report)
            .ok_or_else(|| ProviderError::NotFound {
                provider: PROVIDER_ID.to_string(),
                subject: format!("{} {}", make, model),
            })
    }
}

fn into_report(entry: EmissionsEntry) -> EmissionsReport {
    EmissionsReport {
        energy_class: entry
            .energy_class
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty()),
        co2_grams_per_km: entry.co2,
        fuel_consumption_mixed: entry.mixed_consumption,
        euro_standard: entry.euro_norm.as_deref().and_then(parse_euro_norm),
    }
}
