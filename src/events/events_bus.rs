use log::debug;
use rust_decimal::Decimal;
use tokio::sync::broadcast;

/// In-process billing notifications. `RatesChanged` is the internal signal
/// the coordinator reacts to; `TotalAmountUpdated` is the client-visible
/// broadcast UI observers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingEvent {
    RatesChanged { total: Decimal },
    TotalAmountUpdated { total: Decimal },
}

impl BillingEvent {
    /// Event name as exposed to clients.
    pub fn name(&self) -> &'static str {
        match self {
            BillingEvent::RatesChanged { .. } => "rates-changed",
            BillingEvent::TotalAmountUpdated { .. } => "total-amount-updated",
        }
    }
}

/// Fire-and-forget publisher for billing events. Emitting with no live
/// subscribers is not an error; there is no delivery guarantee beyond
/// in-process receivers.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<BillingEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        EventBus { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BillingEvent> {
        self.tx.subscribe()
    }

    pub fn emit_rates_changed(&self, total: Decimal) {
        self.emit(BillingEvent::RatesChanged { total });
    }

    pub fn emit_total_updated(&self, total: Decimal) {
        self.emit(BillingEvent::TotalAmountUpdated { total });
    }

    fn emit(&self, event: BillingEvent) {
        if self.tx.send(event).is_err() {
            debug!("No subscribers for billing event '{}'", event.name());
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        EventBus::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn delivers_to_subscribers() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.emit_total_updated(dec!(3000));
        assert_eq!(
            rx.recv().await.unwrap(),
            BillingEvent::TotalAmountUpdated { total: dec!(3000) }
        );
    }

    #[test]
    fn emitting_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.emit_rates_changed(dec!(1));
    }
}
