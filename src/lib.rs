pub mod db;

pub mod accounts;
pub mod billing;
pub mod constants;
pub mod errors;
pub mod events;
pub mod invoices;
pub mod payments;
pub mod rates;
pub mod schema;
pub mod utils;

pub use billing::BillingCoordinator;
pub use events::{BillingEvent, EventBus};
pub use invoices::InvoiceLedger;
pub use rates::RatesService;
