//! Crit'Air classification computed locally from the official rule table
//! for passenger cars (arrêté du 21 juin 2016).
//!
//! The Euro standard takes precedence; the first registration date is used
//! when the standard is unknown.
//!
//! | Energy | Level 0 | 1 | 2 | 3 | 4 | 5 |
//! |--------|---------|---|---|---|---|---|
//! | Electric / hydrogen | always | | | | | |
//! | Gas, plug-in hybrid | | always | | | | |
//! | Petrol (incl. hybrid) | | Euro 5-6 (2011+) | Euro 4 (2006-2010) | Euro 2-3 (1997-2005) | | |
//! | Diesel (incl. hybrid) | | | Euro 5-6 (2011+) | Euro 4 (2006-2010) | Euro 3 (2001-2005) | Euro 2 (1997-2000) |

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::errors::ProviderError;
use crate::models::{ClassificationQuery, EmissionClassification, FuelType};
use crate::provider::EmissionClassProvider;

const PROVIDER_ID: &str = "critair_rules";

#[derive(Clone, Copy, Debug, Default)]
pub struct CritAirRulesProvider;

impl CritAirRulesProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmissionClassProvider for CritAirRulesProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Crit'Air rules"
    }

    async fn classify(
        &self,
        query: &ClassificationQuery,
    ) -> Result<EmissionClassification, ProviderError> {
        let fuel = query.fuel_type.ok_or_else(|| {
            ProviderError::InsufficientData("fuel type is required for Crit'Air".to_string())
        })?;

        let euro = match query.euro_standard {
            Some(standard) => Some(standard),
            None => query.first_registration_date.map(euro_from_registration),
        };

        classify(fuel, euro).ok_or_else(|| {
            ProviderError::InsufficientData(
                "Euro standard or first registration date is required for Crit'Air".to_string(),
            )
        })
    }
}

/// Euro standard implied by the first registration date.
/// 0 stands for pre-Euro vehicles.
fn euro_from_registration(date: NaiveDate) -> u8 {
    match date.year() {
        y if y >= 2011 => 5,
        2006..=2010 => 4,
        2001..=2005 => 3,
        1997..=2000 => 2,
        1993..=1996 => 1,
        _ => 0,
    }
}

/// Returns `None` when the energy needs a Euro standard and none is known.
fn classify(fuel: FuelType, euro: Option<u8>) -> Option<EmissionClassification> {
    let level = match fuel {
        FuelType::Electric | FuelType::Hydrogen => Some(0),
        FuelType::Lpg | FuelType::Cng | FuelType::PluginHybrid => Some(1),
        FuelType::Petrol | FuelType::HybridPetrol | FuelType::Other => match euro? {
            5..=u8::MAX => Some(1),
            4 => Some(2),
            2 | 3 => Some(3),
            _ => None,
        },
        FuelType::Diesel | FuelType::HybridDiesel => match euro? {
            5..=u8::MAX => Some(2),
            4 => Some(3),
            3 => Some(4),
            2 => Some(5),
            _ => None,
        },
    };

    Some(match level {
        Some(level) => EmissionClassification::level(level),
        None => EmissionClassification::unclassified(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleIdentifier;

    fn query(fuel: Option<FuelType>, euro: Option<u8>, year: Option<i32>) -> ClassificationQuery {
        ClassificationQuery {
            identifier: VehicleIdentifier::plate("AB-123-CD"),
            fuel_type: fuel,
            euro_standard: euro,
            first_registration_date: year.and_then(|y| NaiveDate::from_ymd_opt(y, 6, 1)),
        }
    }

    #[tokio::test]
    async fn test_rule_table() {
        let provider = CritAirRulesProvider::new();
        let cases = [
            (FuelType::Electric, None, None, Some(0)),
            (FuelType::Lpg, None, None, Some(1)),
            (FuelType::Petrol, Some(6), None, Some(1)),
            (FuelType::Petrol, None, Some(2008), Some(2)),
            (FuelType::Petrol, Some(3), None, Some(3)),
            (FuelType::Petrol, None, Some(1990), None),
            (FuelType::Diesel, Some(6), None, Some(2)),
            (FuelType::Diesel, None, Some(2007), Some(3)),
            (FuelType::Diesel, Some(3), None, Some(4)),
            (FuelType::Diesel, None, Some(1998), Some(5)),
            (FuelType::Diesel, Some(1), None, None),
        ];

        for (fuel, euro, year, expected) in cases {
            let result = provider.classify(&query(Some(fuel), euro, year)).await.unwrap();
            assert_eq!(result.level, expected, "{:?} euro={:?} year={:?}", fuel, euro, year);
        }
    }

    #[tokio::test]
    async fn test_euro_standard_wins_over_date() {
        let provider = CritAirRulesProvider::new();
        let result = provider
            .classify(&query(Some(FuelType::Diesel), Some(6), Some(2005)))
            .await
            .unwrap();
        assert_eq!(result.level, Some(2));
    }

    #[tokio::test]
    async fn test_missing_inputs() {
        let provider = CritAirRulesProvider::new();

        let no_fuel = provider.classify(&query(None, Some(6), None)).await;
        assert!(matches!(no_fuel, Err(ProviderError::InsufficientData(_))));

        let no_age = provider
            .classify(&query(Some(FuelType::Petrol), None, None))
            .await;
        assert!(matches!(no_age, Err(ProviderError::InsufficientData(_))));

        // electric cars need no age information
        let electric = provider
            .classify(&query(Some(FuelType::Electric), None, None))
            .await
            .unwrap();
        assert_eq!(electric.level, Some(0));
    }
}
