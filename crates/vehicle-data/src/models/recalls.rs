use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{VehicleIdentifier, VehicleRecord};

/// Recall search arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallQuery {
    pub identifier: VehicleIdentifier,
    pub vin: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl RecallQuery {
    pub fn new(identifier: &VehicleIdentifier, vehicle: Option<&VehicleRecord>) -> Self {
        Self {
            identifier: identifier.clone(),
            vin: identifier
                .as_vin()
                .map(str::to_string)
                .or_else(|| vehicle.and_then(|v| v.vin.clone())),
            make: vehicle.and_then(|v| v.make.clone()),
            model: vehicle.and_then(|v| v.model.clone()),
            year: vehicle.and_then(VehicleRecord::registration_year),
        }
    }
}

/// One manufacturer recall campaign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallCampaign {
    pub campaign_id: String,
    pub component: Option<String>,
    pub summary: Option<String>,
    pub reported_on: Option<NaiveDate>,
}

/// Recall campaigns affecting a vehicle. An empty list is a valid answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallReport {
    pub campaigns: Vec<RecallCampaign>,
}
