use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Invoice lifecycle status. Invoices are never hard-deleted; closure is
/// modelled as a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(InvoiceStatus::Pending),
            "Paid" => Ok(InvoiceStatus::Paid),
            "Overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown invoice status '{}'",
                other
            ))
            .into()),
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model: one current invoice per tenant account. The invoice id is
/// the tenant's auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_id: String,
    pub total_amount: Decimal,
    pub outstanding_balance: Decimal,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for invoices. Amounts are stored as TEXT and parsed at
/// the model boundary.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::invoices)]
#[diesel(primary_key(invoice_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvoiceDB {
    pub invoice_id: String,
    pub total_amount: String,
    pub outstanding_balance: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<InvoiceDB> for Invoice {
    type Error = Error;

    fn try_from(db: InvoiceDB) -> Result<Self, Self::Error> {
        Ok(Invoice {
            total_amount: Decimal::from_str(&db.total_amount)?,
            outstanding_balance: Decimal::from_str(&db.outstanding_balance)?,
            status: db.status.parse()?,
            invoice_id: db.invoice_id,
            due_date: db.due_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Row values for an idempotent insert-or-update keyed by `invoice_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceUpsert {
    pub invoice_id: String,
    pub total_amount: Decimal,
    pub outstanding_balance: Decimal,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

/// One successfully rolled-over invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloverEntry {
    pub invoice_id: String,
    pub new_outstanding: Decimal,
    pub new_due_date: NaiveDate,
}

/// One invoice the rollover sweep could not update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloverFailure {
    pub invoice_id: String,
    pub reason: String,
}

/// Outcome of one rollover sweep. Per-row failures are collected here
/// rather than aborting the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloverReport {
    pub updated: Vec<RolloverEntry>,
    pub failures: Vec<RolloverFailure>,
}

impl RolloverReport {
    pub fn processed(&self) -> usize {
        self.updated.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
