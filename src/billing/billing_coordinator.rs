use log::{debug, error, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::accounts::CurrentUserProviderTrait;
use crate::billing::debounce_timer::DebounceTimer;
use crate::constants::DEBOUNCE_WINDOW_MS;
use crate::events::{BillingEvent, EventBus};
use crate::invoices::InvoiceLedgerTrait;

/// Per-session coordinator state. The invoice id is resolved once per
/// session and cached; persistent resolution failure keeps the session in
/// `ResolvingInvoiceId` until the next rate change retries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    ResolvingInvoiceId,
    Ready { invoice_id: String },
    Writing { invoice_id: String },
}

/// Bridges rate changes to ledger writes for the active tenant. Changes are
/// debounced: only the final total after the quiescence window is written.
pub struct BillingCoordinator {
    ledger: Arc<dyn InvoiceLedgerTrait>,
    identity: Arc<dyn CurrentUserProviderTrait>,
    bus: EventBus,
    timer: DebounceTimer,
    state: Arc<Mutex<SessionState>>,
}

impl BillingCoordinator {
    pub fn new(
        ledger: Arc<dyn InvoiceLedgerTrait>,
        identity: Arc<dyn CurrentUserProviderTrait>,
        bus: EventBus,
    ) -> Self {
        Self::with_debounce_window(
            ledger,
            identity,
            bus,
            Duration::from_millis(DEBOUNCE_WINDOW_MS),
        )
    }

    pub fn with_debounce_window(
        ledger: Arc<dyn InvoiceLedgerTrait>,
        identity: Arc<dyn CurrentUserProviderTrait>,
        bus: EventBus,
        window: Duration,
    ) -> Self {
        BillingCoordinator {
            ledger,
            identity,
            bus,
            timer: DebounceTimer::new(window),
            state: Arc::new(Mutex::new(SessionState::Uninitialized)),
        }
    }

    /// Schedules a debounced ledger write for the new total. A call within
    /// the quiescence window replaces the pending write.
    pub fn on_rate_change(&self, new_total: Decimal) {
        let ledger = self.ledger.clone();
        let identity = self.identity.clone();
        let bus = self.bus.clone();
        let state = self.state.clone();
        self.timer.schedule(async move {
            apply_total(ledger, identity, bus, state, new_total).await;
        });
    }

    /// Spawns a listener task bridging `RatesChanged` bus events into
    /// debounced ledger writes.
    pub fn spawn_listener(
        self: &Arc<Self>,
        mut rx: broadcast::Receiver<BillingEvent>,
    ) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(BillingEvent::RatesChanged { total }) => coordinator.on_rate_change(total),
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Billing listener lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Ends the tenant session: a pending debounced write is discarded, not
    /// flushed, and the cached invoice id is forgotten.
    pub async fn end_session(&self) {
        self.timer.cancel();
        let mut state = self.state.lock().await;
        *state = SessionState::Uninitialized;
    }

    pub async fn session_state(&self) -> SessionState {
        self.state.lock().await.clone()
    }
}

async fn apply_total(
    ledger: Arc<dyn InvoiceLedgerTrait>,
    identity: Arc<dyn CurrentUserProviderTrait>,
    bus: EventBus,
    state: Arc<Mutex<SessionState>>,
    total: Decimal,
) {
    let invoice_id = {
        let mut state = state.lock().await;
        match &*state {
            SessionState::Ready { invoice_id } | SessionState::Writing { invoice_id } => {
                invoice_id.clone()
            }
            SessionState::Uninitialized | SessionState::ResolvingInvoiceId => {
                *state = SessionState::ResolvingInvoiceId;
                match identity.current_user() {
                    Ok(Some(user)) => {
                        let invoice_id = user.id;
                        *state = SessionState::Ready {
                            invoice_id: invoice_id.clone(),
                        };
                        invoice_id
                    }
                    Ok(None) => {
                        debug!("No authenticated tenant, dropping rate update");
                        return;
                    }
                    Err(e) => {
                        error!("Failed to resolve current tenant: {}", e);
                        return;
                    }
                }
            }
        }
    };

    {
        let mut state = state.lock().await;
        *state = SessionState::Writing {
            invoice_id: invoice_id.clone(),
        };
    }

    match ledger.upsert_total(&invoice_id, total).await {
        Ok(_) => {
            bus.emit_total_updated(total);
        }
        Err(e) => {
            error!("Failed to write invoice total for {}: {}", invoice_id, e);
        }
    }

    // Write failures return the session to Ready, not to an error state.
    let mut state = state.lock().await;
    *state = SessionState::Ready { invoice_id };
}
