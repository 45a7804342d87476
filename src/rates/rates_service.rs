use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::errors::Result;
use crate::events::EventBus;
use crate::rates::rates_model::{RateConfig, RatesUpdate};
use crate::rates::rates_traits::{RatesRepositoryTrait, RatesServiceTrait};

pub struct RatesService {
    repository: Arc<dyn RatesRepositoryTrait>,
    bus: EventBus,
}

impl RatesService {
    pub fn new(repository: Arc<dyn RatesRepositoryTrait>, bus: EventBus) -> Self {
        RatesService { repository, bus }
    }
}

#[async_trait]
impl RatesServiceTrait for RatesService {
    fn get_rates(&self) -> Result<RateConfig> {
        self.repository.get_rates()
    }

    async fn save_rates(&self, update: RatesUpdate) -> Result<RateConfig> {
        update.validate()?;

        let saved = self.repository.update_rates(&update).await?;
        let total = saved.total();
        debug!("Utility rates saved, new total {}", total);
        self.bus.emit_rates_changed(total);

        Ok(saved)
    }

    async fn reset_to_defaults(&self) -> Result<RateConfig> {
        self.save_rates(RatesUpdate::defaults()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;
    use tokio::sync::broadcast::error::TryRecvError;

    use crate::errors::{DatabaseError, Error};
    use crate::events::BillingEvent;

    struct MockRatesRepository {
        current: RwLock<RatesUpdate>,
        fail_updates: bool,
    }

    impl MockRatesRepository {
        fn new(initial: RatesUpdate) -> Self {
            MockRatesRepository {
                current: RwLock::new(initial),
                fail_updates: false,
            }
        }
    }

    #[async_trait]
    impl RatesRepositoryTrait for MockRatesRepository {
        fn get_rates(&self) -> Result<RateConfig> {
            let current = self.current.read().unwrap();
            Ok(RateConfig {
                electricity_rate: current.electricity_rate,
                water_rate: current.water_rate,
                wifi_rate: current.wifi_rate,
                updated_at: Utc::now().naive_utc(),
            })
        }

        async fn update_rates(&self, update: &RatesUpdate) -> Result<RateConfig> {
            if self.fail_updates {
                return Err(Error::Database(DatabaseError::MigrationFailed(
                    "injected failure".to_string(),
                )));
            }
            *self.current.write().unwrap() = update.clone();
            self.get_rates()
        }
    }

    fn service_with(repo: MockRatesRepository) -> (RatesService, EventBus) {
        let bus = EventBus::default();
        (RatesService::new(Arc::new(repo), bus.clone()), bus)
    }

    #[tokio::test]
    async fn save_emits_exactly_one_rates_changed_event() {
        let (service, bus) = service_with(MockRatesRepository::new(RatesUpdate::defaults()));
        let mut rx = bus.subscribe();

        let saved = service
            .save_rates(RatesUpdate {
                electricity_rate: dec!(1500),
                water_rate: dec!(900),
                wifi_rate: dec!(1100),
            })
            .await
            .unwrap();

        assert_eq!(saved.total(), dec!(3500));
        assert_eq!(
            rx.try_recv().unwrap(),
            BillingEvent::RatesChanged { total: dec!(3500) }
        );
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn negative_rate_is_rejected_without_persisting_or_emitting() {
        let (service, bus) = service_with(MockRatesRepository::new(RatesUpdate::defaults()));
        let mut rx = bus.subscribe();

        let result = service
            .save_rates(RatesUpdate {
                electricity_rate: dec!(-10),
                water_rate: dec!(800),
                wifi_rate: dec!(1000),
            })
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(service.get_rates().unwrap().total(), dec!(3000));
    }

    #[tokio::test]
    async fn repository_failure_is_surfaced_without_emitting() {
        let mut repo = MockRatesRepository::new(RatesUpdate::defaults());
        repo.fail_updates = true;
        let (service, bus) = service_with(repo);
        let mut rx = bus.subscribe();

        let result = service.save_rates(RatesUpdate::defaults()).await;

        assert!(matches!(result, Err(Error::Database(_))));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn reset_restores_fixed_defaults() {
        let (service, bus) = service_with(MockRatesRepository::new(RatesUpdate {
            electricity_rate: dec!(5),
            water_rate: dec!(5),
            wifi_rate: dec!(5),
        }));
        let mut rx = bus.subscribe();

        let saved = service.reset_to_defaults().await.unwrap();

        assert_eq!(saved.electricity_rate, dec!(1200));
        assert_eq!(saved.water_rate, dec!(800));
        assert_eq!(saved.wifi_rate, dec!(1000));
        assert_eq!(
            rx.try_recv().unwrap(),
            BillingEvent::RatesChanged { total: dec!(3000) }
        );
    }

    #[tokio::test]
    async fn repeated_saves_do_not_drift() {
        let (service, _bus) = service_with(MockRatesRepository::new(RatesUpdate::defaults()));
        let update = RatesUpdate {
            electricity_rate: dec!(0.10),
            water_rate: dec!(0.20),
            wifi_rate: dec!(0.30),
        };

        for _ in 0..50 {
            let saved = service.save_rates(update.clone()).await.unwrap();
            assert_eq!(saved.total(), dec!(0.60));
        }
    }
}
