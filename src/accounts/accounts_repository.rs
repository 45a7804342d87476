use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::accounts::accounts_model::{
    format_custom_id, Account, AccountDB, IdSequenceDB, NewAccount, Role,
};
use crate::accounts::accounts_traits::AccountRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::{id_sequences, users};

pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        AccountRepository { pool }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn register(&self, new_account: &NewAccount) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        let new_account = new_account.clone();

        // The count check, the sequence bump and the insert share one
        // immediate transaction, so two near-simultaneous registrations
        // cannot both observe a zero count or draw the same number.
        let created = conn.immediate_transaction::<AccountDB, Error, _>(|conn| {
            let existing: i64 = users::table.count().get_result(conn)?;
            let role = if existing == 0 { Role::Admin } else { Role::Tenant };

            let sequence: IdSequenceDB =
                diesel::update(id_sequences::table.find(role.id_prefix()))
                    .set(id_sequences::next_value.eq(id_sequences::next_value + 1))
                    .get_result(conn)
                    .map_err(|e| match e {
                        diesel::result::Error::NotFound => Error::NotFound(format!(
                            "id sequence for prefix {}",
                            role.id_prefix()
                        )),
                        other => Error::from(other),
                    })?;

            let row = AccountDB {
                user_id: new_account.user_id,
                email: new_account.email,
                first_name: new_account.first_name,
                last_name: new_account.last_name,
                address: new_account.address,
                contact_number: new_account.contact_number,
                role: role.as_str().to_string(),
                custom_id: format_custom_id(role.id_prefix(), sequence.next_value),
                created_at: Utc::now().naive_utc(),
            };

            diesel::insert_into(users::table)
                .values(&row)
                .get_result(conn)
                .map_err(Error::from)
        })?;

        Account::try_from(created)
    }

    fn get_by_user_id(&self, user_id: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(user_id)
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(Error::from)?;

        row.map(Account::try_from).transpose()
    }
}
