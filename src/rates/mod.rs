mod rates_model;
mod rates_repository;
mod rates_service;
mod rates_traits;

pub use rates_model::{RateConfig, RatesUpdate};
pub use rates_repository::RatesRepository;
pub use rates_service::RatesService;
pub use rates_traits::{RatesRepositoryTrait, RatesServiceTrait};
