mod billing_coordinator;
mod debounce_timer;

pub use billing_coordinator::{BillingCoordinator, SessionState};
pub use debounce_timer::DebounceTimer;
