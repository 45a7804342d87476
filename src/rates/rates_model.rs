use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ELECTRICITY_RATE, DEFAULT_WATER_RATE, DEFAULT_WIFI_RATE};
use crate::errors::{Result, ValidationError};
use crate::utils::decimal_utils::parse_decimal_or_zero;

/// Current utility unit rates. Process-wide shared state with a single
/// writer (the settings-save operation) and many readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    pub electricity_rate: Decimal,
    pub water_rate: Decimal,
    pub wifi_rate: Decimal,
    pub updated_at: NaiveDateTime,
}

impl RateConfig {
    /// Exact decimal sum of the three unit rates.
    pub fn total(&self) -> Decimal {
        self.electricity_rate + self.water_rate + self.wifi_rate
    }
}

/// Input model for saving new rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesUpdate {
    pub electricity_rate: Decimal,
    pub water_rate: Decimal,
    pub wifi_rate: Decimal,
}

impl RatesUpdate {
    pub fn defaults() -> Self {
        RatesUpdate {
            electricity_rate: DEFAULT_ELECTRICITY_RATE,
            water_rate: DEFAULT_WATER_RATE,
            wifi_rate: DEFAULT_WIFI_RATE,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("electricityRate", self.electricity_rate),
            ("waterRate", self.water_rate),
            ("wifiRate", self.wifi_rate),
        ] {
            if value < Decimal::ZERO {
                return Err(ValidationError::InvalidInput(format!(
                    "{} must not be negative, got {}",
                    name, value
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Database model for the single utility-rate settings row.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RateConfigDB {
    pub id: i32,
    pub electricity_rate: String,
    pub water_rate: String,
    pub wifi_rate: String,
    pub updated_at: NaiveDateTime,
}

impl From<RateConfigDB> for RateConfig {
    fn from(db: RateConfigDB) -> Self {
        RateConfig {
            electricity_rate: parse_decimal_or_zero(&db.electricity_rate, "electricity_rate"),
            water_rate: parse_decimal_or_zero(&db.water_rate, "water_rate"),
            wifi_rate: parse_decimal_or_zero(&db.wifi_rate, "wifi_rate"),
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_is_the_exact_decimal_sum() {
        let config = RateConfig {
            electricity_rate: dec!(0.1),
            water_rate: dec!(0.2),
            wifi_rate: dec!(0.3),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        assert_eq!(config.total(), dec!(0.6));
    }

    #[test]
    fn validate_rejects_negative_rates() {
        let mut update = RatesUpdate::defaults();
        assert!(update.validate().is_ok());

        update.water_rate = dec!(-1);
        assert!(update.validate().is_err());
    }

    #[test]
    fn db_conversion_normalizes_garbage_to_zero() {
        let db = RateConfigDB {
            id: 1,
            electricity_rate: "1200".to_string(),
            water_rate: "not-a-number".to_string(),
            wifi_rate: "1000".to_string(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        let config = RateConfig::from(db);
        assert_eq!(config.water_rate, Decimal::ZERO);
        assert_eq!(config.total(), dec!(2200));
    }
}
