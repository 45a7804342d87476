use async_trait::async_trait;

use crate::errors::Result;
use crate::rates::rates_model::{RateConfig, RatesUpdate};

/// Trait for rate-config repository operations
#[async_trait]
pub trait RatesRepositoryTrait: Send + Sync {
    /// Get the single settings row. Fails with `Error::NotFound` if absent.
    fn get_rates(&self) -> Result<RateConfig>;

    /// Overwrite the settings row with a fresh `updated_at`.
    async fn update_rates(&self, update: &RatesUpdate) -> Result<RateConfig>;
}

/// Trait for rate-config service operations
#[async_trait]
pub trait RatesServiceTrait: Send + Sync {
    fn get_rates(&self) -> Result<RateConfig>;

    /// Validates and persists new rates. Exactly one `RatesChanged`
    /// notification per successful save, never on failure.
    async fn save_rates(&self, update: RatesUpdate) -> Result<RateConfig>;

    /// Saves the fixed default rates (electricity=1200, water=800, wifi=1000).
    async fn reset_to_defaults(&self) -> Result<RateConfig>;
}
