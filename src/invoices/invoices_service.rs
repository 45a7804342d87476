use async_trait::async_trait;
use chrono::{Months, NaiveDate, Utc};
use log::{error, info};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::{Error, Result, ValidationError};
use crate::invoices::invoices_model::{
    Invoice, InvoiceStatus, InvoiceUpsert, RolloverEntry, RolloverFailure, RolloverReport,
};
use crate::invoices::invoices_traits::{InvoiceLedgerTrait, InvoiceRepositoryTrait};

pub struct InvoiceLedger {
    repository: Arc<dyn InvoiceRepositoryTrait>,
    // Guards against overlapping rollover sweeps; see `rollover`.
    rollover_guard: Mutex<()>,
}

impl InvoiceLedger {
    pub fn new(repository: Arc<dyn InvoiceRepositoryTrait>) -> Self {
        InvoiceLedger {
            repository,
            rollover_guard: Mutex::new(()),
        }
    }
}

#[async_trait]
impl InvoiceLedgerTrait for InvoiceLedger {
    fn get_by_tenant(&self, invoice_id: &str) -> Result<Invoice> {
        self.repository
            .get_by_id(invoice_id)?
            .ok_or_else(|| Error::NotFound(format!("invoice {}", invoice_id)))
    }

    async fn upsert_total(&self, invoice_id: &str, total: Decimal) -> Result<Invoice> {
        if total < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "invoice total must not be negative, got {}",
                total
            ))
            .into());
        }

        self.repository
            .upsert(&InvoiceUpsert {
                invoice_id: invoice_id.to_string(),
                total_amount: total,
                outstanding_balance: total,
                due_date: Utc::now().date_naive(),
                status: InvoiceStatus::Pending,
            })
            .await
    }

    async fn rollover(&self, as_of: NaiveDate) -> Result<RolloverReport> {
        let _guard = self
            .rollover_guard
            .try_lock()
            .map_err(|_| Error::Busy("rollover sweep already in progress".to_string()))?;

        let due_invoices = self.repository.list_due(as_of)?;
        if due_invoices.is_empty() {
            info!("No pending or overdue invoices to roll over");
            return Ok(RolloverReport::default());
        }

        let next_due = match as_of.checked_add_months(Months::new(1)) {
            Some(date) => date,
            None => {
                return Err(Error::InvariantViolation(format!(
                    "cannot advance {} by one month",
                    as_of
                )))
            }
        };

        let mut report = RolloverReport::default();
        for invoice in due_invoices {
            let new_outstanding = invoice.outstanding_balance + invoice.total_amount;
            if new_outstanding < Decimal::ZERO {
                let reason = format!(
                    "computed outstanding balance {} is negative",
                    new_outstanding
                );
                error!("Skipping invoice {}: {}", invoice.invoice_id, reason);
                report.failures.push(RolloverFailure {
                    invoice_id: invoice.invoice_id,
                    reason,
                });
                continue;
            }

            match self
                .repository
                .apply_rollover(&invoice.invoice_id, new_outstanding, next_due)
                .await
            {
                Ok(()) => {
                    info!(
                        "Rolled over invoice {}: new outstanding = {}, due {}",
                        invoice.invoice_id, new_outstanding, next_due
                    );
                    report.updated.push(RolloverEntry {
                        invoice_id: invoice.invoice_id,
                        new_outstanding,
                        new_due_date: next_due,
                    });
                }
                Err(e) => {
                    error!("Failed to roll over invoice {}: {}", invoice.invoice_id, e);
                    report.failures.push(RolloverFailure {
                        invoice_id: invoice.invoice_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Rollover sweep finished: {} updated, {} failed",
            report.updated.len(),
            report.failures.len()
        );
        Ok(report)
    }
}
