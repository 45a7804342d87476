use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::invoices::invoices_model::{Invoice, InvoiceUpsert, RolloverReport};

/// Trait for invoice repository operations
#[async_trait]
pub trait InvoiceRepositoryTrait: Send + Sync {
    /// Get an invoice by its id (one per tenant account).
    fn get_by_id(&self, invoice_id: &str) -> Result<Option<Invoice>>;

    /// Insert-or-update keyed by invoice id. Must be safe to call
    /// repeatedly with the same values.
    async fn upsert(&self, row: &InvoiceUpsert) -> Result<Invoice>;

    /// Every invoice whose status is Pending or whose due date is before
    /// `as_of`, fetched as one batch.
    fn list_due(&self, as_of: NaiveDate) -> Result<Vec<Invoice>>;

    /// Persist one rollover update (new outstanding balance and due date).
    async fn apply_rollover(
        &self,
        invoice_id: &str,
        new_outstanding: Decimal,
        new_due_date: NaiveDate,
    ) -> Result<()>;
}

/// Trait for the invoice ledger service
#[async_trait]
pub trait InvoiceLedgerTrait: Send + Sync {
    /// Get the tenant's current invoice, failing with `Error::NotFound`
    /// if none exists yet.
    fn get_by_tenant(&self, invoice_id: &str) -> Result<Invoice>;

    /// Idempotent upsert of the tenant's invoice for a freshly computed
    /// total: due today, status Pending, outstanding balance reset to the
    /// total.
    async fn upsert_total(&self, invoice_id: &str, total: Decimal) -> Result<Invoice>;

    /// Monthly rollover sweep: for every due invoice, compound the unpaid
    /// total into the outstanding balance and push the due date one
    /// calendar month past `as_of`. Non-reentrant: a second call while one
    /// is in flight fails with `Error::Busy`.
    async fn rollover(&self, as_of: NaiveDate) -> Result<RolloverReport>;
}
