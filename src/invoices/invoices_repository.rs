use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::invoices::invoices_model::{Invoice, InvoiceDB, InvoiceStatus, InvoiceUpsert};
use crate::invoices::invoices_traits::InvoiceRepositoryTrait;
use crate::schema::invoices;

pub struct InvoiceRepository {
    pool: Arc<DbPool>,
}

impl InvoiceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        InvoiceRepository { pool }
    }
}

#[async_trait]
impl InvoiceRepositoryTrait for InvoiceRepository {
    fn get_by_id(&self, invoice_id: &str) -> Result<Option<Invoice>> {
        let mut conn = get_connection(&self.pool)?;
        let row = invoices::table
            .find(invoice_id)
            .first::<InvoiceDB>(&mut conn)
            .optional()
            .map_err(Error::from)?;

        row.map(Invoice::try_from).transpose()
    }

    async fn upsert(&self, row: &InvoiceUpsert) -> Result<Invoice> {
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();

        let db_row = InvoiceDB {
            invoice_id: row.invoice_id.clone(),
            total_amount: row.total_amount.to_string(),
            outstanding_balance: row.outstanding_balance.to_string(),
            due_date: row.due_date,
            status: row.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        // created_at is deliberately left out of the conflict update so the
        // original insertion time survives repeated upserts.
        diesel::insert_into(invoices::table)
            .values(&db_row)
            .on_conflict(invoices::invoice_id)
            .do_update()
            .set((
                invoices::total_amount.eq(&db_row.total_amount),
                invoices::outstanding_balance.eq(&db_row.outstanding_balance),
                invoices::due_date.eq(db_row.due_date),
                invoices::status.eq(&db_row.status),
                invoices::updated_at.eq(db_row.updated_at),
            ))
            .execute(&mut conn)
            .map_err(Error::from)?;

        self.get_by_id(&row.invoice_id)?
            .ok_or_else(|| Error::NotFound(format!("invoice {}", row.invoice_id)))
    }

    fn list_due(&self, as_of: NaiveDate) -> Result<Vec<Invoice>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = invoices::table
            .filter(
                invoices::status
                    .eq(InvoiceStatus::Pending.as_str())
                    .or(invoices::due_date.lt(as_of)),
            )
            .order(invoices::invoice_id.asc())
            .load::<InvoiceDB>(&mut conn)
            .map_err(Error::from)?;

        rows.into_iter().map(Invoice::try_from).collect()
    }

    async fn apply_rollover(
        &self,
        invoice_id: &str,
        new_outstanding: Decimal,
        new_due_date: NaiveDate,
    ) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::update(invoices::table.find(invoice_id))
            .set((
                invoices::outstanding_balance.eq(new_outstanding.to_string()),
                invoices::due_date.eq(new_due_date),
                invoices::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .map_err(Error::from)?;

        if affected == 0 {
            return Err(Error::NotFound(format!("invoice {}", invoice_id)));
        }

        Ok(())
    }
}
