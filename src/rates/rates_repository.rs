use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::constants::SETTINGS_ROW_ID;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::rates::rates_model::{RateConfig, RateConfigDB, RatesUpdate};
use crate::rates::rates_traits::RatesRepositoryTrait;
use crate::schema::settings;

pub struct RatesRepository {
    pool: Arc<DbPool>,
}

impl RatesRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        RatesRepository { pool }
    }
}

#[async_trait]
impl RatesRepositoryTrait for RatesRepository {
    fn get_rates(&self) -> Result<RateConfig> {
        let mut conn = get_connection(&self.pool)?;
        let row = settings::table
            .find(SETTINGS_ROW_ID)
            .first::<RateConfigDB>(&mut conn)
            .optional()
            .map_err(Error::from)?
            .ok_or_else(|| Error::NotFound("utility settings row".to_string()))?;

        Ok(RateConfig::from(row))
    }

    async fn update_rates(&self, update: &RatesUpdate) -> Result<RateConfig> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::update(settings::table.find(SETTINGS_ROW_ID))
            .set((
                settings::electricity_rate.eq(update.electricity_rate.to_string()),
                settings::water_rate.eq(update.water_rate.to_string()),
                settings::wifi_rate.eq(update.wifi_rate.to_string()),
                settings::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .map_err(Error::from)?;

        if affected == 0 {
            return Err(Error::NotFound("utility settings row".to_string()));
        }

        self.get_rates()
    }
}
