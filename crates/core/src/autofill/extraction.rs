//! Field extraction from provider responses.
//!
//! Each response type exposes a fixed list of listing fields. Missing and
//! blank values are dropped; when two sources produce the same field the one
//! collected first is kept.

use std::collections::HashSet;

use autofill_vehicle_data::{
    EmissionClassification, EmissionsReport, RecallReport, VehicleRecord, VinSpecification,
};

use super::autofill_model::CertifiedFieldResult;

/// A provider response that contributes listing fields.
pub trait FieldSource {
    fn fields(&self) -> Vec<(&'static str, Option<String>)>;
}

fn number<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

impl FieldSource for VehicleRecord {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("make", self.make.clone()),
            ("model", self.model.clone()),
            ("variant", self.variant.clone()),
            ("vin", self.vin.clone()),
            (
                "firstRegistrationDate",
                self.first_registration_date
                    .map(|d| d.format("%Y-%m-%d").to_string()),
            ),
            ("fuelType", self.fuel_type.map(|f| f.as_str().to_string())),
            ("transmission", self.transmission.clone()),
            ("bodyType", self.body_type.clone()),
            ("color", self.color.clone()),
            ("doors", number(self.doors)),
            ("seats", number(self.seats)),
            ("fiscalHorsepower", number(self.fiscal_horsepower)),
            ("powerKw", number(self.power_kw)),
        ]
    }
}

impl FieldSource for EmissionsReport {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("energyClass", self.energy_class.clone()),
            ("co2Emissions", number(self.co2_grams_per_km)),
            ("fuelConsumptionMixed", number(self.fuel_consumption_mixed)),
            ("euroStandard", number(self.euro_standard)),
        ]
    }
}

impl FieldSource for RecallReport {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        let campaigns = self
            .campaigns
            .iter()
            .map(|c| c.campaign_id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("recallCount", Some(self.campaigns.len().to_string())),
            ("recallCampaigns", Some(campaigns)),
        ]
    }
}

impl FieldSource for EmissionClassification {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![("critAirLevel", number(self.level))]
    }
}

impl FieldSource for VinSpecification {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("bodyClass", self.body_class.clone()),
            ("manufacturer", self.manufacturer.clone()),
            ("modelYear", number(self.model_year)),
            ("plantCountry", self.plant_country.clone()),
            ("engineCylinders", number(self.engine_cylinders)),
            ("displacementLiters", number(self.displacement_liters)),
            ("driveType", self.drive_type.clone()),
        ]
    }
}

/// Accumulates certified fields across sources, first source wins.
#[derive(Debug, Default)]
pub struct FieldCollector {
    fields: Vec<CertifiedFieldResult>,
    seen: HashSet<&'static str>,
}

impl FieldCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect<S: FieldSource + ?Sized>(&mut self, response: &S, source: &str) {
        for (name, value) in response.fields() {
            let value = match value {
                Some(v) if !v.trim().is_empty() => v.trim().to_string(),
                _ => continue,
            };
            if !self.seen.insert(name) {
                continue;
            }
            self.fields.push(CertifiedFieldResult {
                field_name: name.to_string(),
                field_value: value,
                source: source.to_string(),
                is_certified: true,
            });
        }
    }

    pub fn into_fields(self) -> Vec<CertifiedFieldResult> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofill_vehicle_data::RecallCampaign;

    #[test]
    fn test_drops_missing_and_blank_values() {
        let record = VehicleRecord {
            make: Some("Renault".to_string()),
            model: Some("  ".to_string()),
            doors: Some(5),
            ..Default::default()
        };

        let mut collector = FieldCollector::new();
        collector.collect(&record, "Vehicle registry");
        let fields = collector.into_fields();

        let names: Vec<_> = fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["make", "doors"]);
        assert!(fields.iter().all(|f| f.is_certified));
        assert_eq!(fields[1].field_value, "5");
    }

    #[test]
    fn test_first_source_wins() {
        let emissions = EmissionsReport {
            euro_standard: Some(6),
            ..Default::default()
        };
        let other = EmissionsReport {
            euro_standard: Some(5),
            energy_class: Some("D".to_string()),
            ..Default::default()
        };

        let mut collector = FieldCollector::new();
        collector.collect(&emissions, "ADEME");
        collector.collect(&other, "cache (emissions)");
        let fields = collector.into_fields();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_value, "6");
        assert_eq!(fields[0].source, "ADEME");
        assert_eq!(fields[1].field_name, "energyClass");
    }

    #[test]
    fn test_recall_fields() {
        let empty = RecallReport::default();
        let fields = empty.fields();
        assert_eq!(fields[0], ("recallCount", Some("0".to_string())));

        let mut collector = FieldCollector::new();
        collector.collect(&empty, "NHTSA");
        assert_eq!(collector.into_fields().len(), 1);

        let report = RecallReport {
            campaigns: vec![
                RecallCampaign {
                    campaign_id: "21V123000".to_string(),
                    component: None,
                    summary: None,
                    reported_on: None,
                },
                RecallCampaign {
                    campaign_id: "22V456000".to_string(),
                    component: None,
                    summary: None,
                    reported_on: None,
                },
            ],
        };
        let mut collector = FieldCollector::new();
        collector.collect(&report, "NHTSA");
        let fields = collector.into_fields();
        assert_eq!(fields[1].field_value, "21V123000,22V456000");
    }

    #[test]
    fn test_unclassified_level_is_dropped() {
        let mut collector = FieldCollector::new();
        collector.collect(&EmissionClassification::unclassified(), "Crit'Air rules");
        assert!(collector.into_fields().is_empty());
    }
}
