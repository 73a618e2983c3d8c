use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::non_empty;
use crate::errors::ProviderError;
use crate::models::{RecallCampaign, RecallQuery, RecallReport};
use crate::provider::http::HttpClient;
use crate::provider::RecallProvider;

const PROVIDER_ID: &str = "nhtsa_recalls";
const BASE_URL: &str = "https://api.nhtsa.gov/recalls/recallsByVehicle";

#[derive(Debug, Deserialize)]
struct RecallsResponse {
    #[serde(default)]
    results: Vec<RecallItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecallItem {
    #[serde(rename = "NHTSACampaignNumber")]
    campaign_number: Option<String>,
    component: Option<String>,
    summary: Option<String>,
    /// dd/mm/yyyy
    report_received_date: Option<String>,
}

pub struct NhtsaRecallProvider {
    http: HttpClient,
    base_url: String,
}

impl NhtsaRecallProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(PROVIDER_ID),
            base_url: base_url.into(),
        }
    }
}

impl Default for NhtsaRecallProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecallProvider for NhtsaRecallProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        "NHTSA Recalls"
    }

    async fn recalls(&self, query: &RecallQuery) -> Result<RecallReport, ProviderError> {
        let (make, model, year) = match (&query.make, &query.model, query.year) {
            (Some(make), Some(model), Some(year)) => (make, model, year),
            _ => {
                return Err(ProviderError::InsufficientData(
                    "make, model and year are required for a recall search".to_string(),
                ))
            }
        };

        let params = [
            ("make", make.clone()),
            ("model", model.clone()),
            ("modelYear", year.to_string()),
        ];
        let response: RecallsResponse = self.http.get_json(&self.base_url, &params, &[]).await?;

        Ok(into_report(response))
    }
}

fn into_report(response: RecallsResponse) -> RecallReport {
    let campaigns = response
        .results
        .into_iter()
        .filter_map(|item| {
            let campaign_id = non_empty(item.campaign_number)?;
            Some(RecallCampaign {
                campaign_id,
                component: non_empty(item.component),
                summary: non_empty(item.summary),
                reported_on: item
                    .report_received_date
                    .as_deref()
                    .and_then(|d| NaiveDate::parse_from_str(d, "%d/%m/%Y").ok()),
            })
        })
        .collect();

    RecallReport { campaigns }
}
