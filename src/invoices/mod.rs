mod invoices_model;
mod invoices_repository;
mod invoices_service;
mod invoices_traits;

pub use invoices_model::{
    Invoice, InvoiceStatus, InvoiceUpsert, RolloverEntry, RolloverFailure, RolloverReport,
};
pub use invoices_repository::InvoiceRepository;
pub use invoices_service::InvoiceLedger;
pub use invoices_traits::{InvoiceLedgerTrait, InvoiceRepositoryTrait};
