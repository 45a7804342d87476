mod events_bus;

pub use events_bus::{BillingEvent, EventBus};
