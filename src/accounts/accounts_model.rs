use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{ADMIN_ID_PREFIX, TENANT_ID_PREFIX};
use crate::errors::{Error, ValidationError};

/// Account role. The first registered account becomes the admin; everyone
/// after that is a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tenant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tenant => "tenant",
        }
    }

    /// Prefix used for this role's custom IDs (e.g. `TENANT-001`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN_ID_PREFIX,
            Role::Tenant => TENANT_ID_PREFIX,
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "tenant" => Ok(Role::Tenant),
            other => {
                Err(ValidationError::InvalidInput(format!("Unknown role '{}'", other)).into())
            }
        }
    }
}

/// Identity of the signed-in user as reported by the auth provider. The
/// tenant's invoice id is this id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

/// Registered account row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub role: Role,
    pub custom_id: String,
    pub created_at: NaiveDateTime,
}

/// Registration input: the auth-provider user id plus profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
}

/// Database model for accounts.
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub role: String,
    pub custom_id: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        Ok(Account {
            role: db.role.parse()?,
            user_id: db.user_id,
            email: db.email,
            first_name: db.first_name,
            last_name: db.last_name,
            address: db.address,
            contact_number: db.contact_number,
            custom_id: db.custom_id,
            created_at: db.created_at,
        })
    }
}

/// Database model for the per-prefix custom-ID counters.
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::id_sequences)]
#[diesel(primary_key(prefix))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IdSequenceDB {
    pub prefix: String,
    pub next_value: i32,
}

/// Formats a custom ID like `TENANT-001`.
pub(super) fn format_custom_id(prefix: &str, value: i32) -> String {
    format!("{}-{:03}", prefix, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_ids_are_zero_padded() {
        assert_eq!(format_custom_id("TENANT", 1), "TENANT-001");
        assert_eq!(format_custom_id("TENANT", 42), "TENANT-042");
        assert_eq!(format_custom_id("ADMIN", 1000), "ADMIN-1000");
    }

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("tenant".parse::<Role>().unwrap(), Role::Tenant);
        assert!("landlord".parse::<Role>().is_err());
    }
}
