use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::accounts::accounts_model::{Account, NewAccount};
use crate::accounts::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{Error, Result, ValidationError};

pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        AccountService { repository }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn register(&self, new_account: NewAccount) -> Result<Account> {
        if new_account.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if new_account.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }

        let account = self.repository.register(&new_account).await?;
        info!(
            "Registered account {} as {} ({})",
            account.user_id,
            account.role.as_str(),
            account.custom_id
        );
        Ok(account)
    }

    fn get_by_user_id(&self, user_id: &str) -> Result<Account> {
        self.repository
            .get_by_user_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("account {}", user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::RwLock;

    use crate::accounts::accounts_model::{format_custom_id, Role};

    struct MockAccountRepository {
        accounts: RwLock<Vec<Account>>,
        sequences: RwLock<(i32, i32)>, // (admin, tenant)
    }

    impl MockAccountRepository {
        fn new() -> Self {
            MockAccountRepository {
                accounts: RwLock::new(Vec::new()),
                sequences: RwLock::new((0, 0)),
            }
        }
    }

    #[async_trait]
    impl AccountRepositoryTrait for MockAccountRepository {
        async fn register(&self, new_account: &NewAccount) -> Result<Account> {
            let mut accounts = self.accounts.write().unwrap();
            let mut sequences = self.sequences.write().unwrap();
            let role = if accounts.is_empty() {
                Role::Admin
            } else {
                Role::Tenant
            };
            let value = match role {
                Role::Admin => {
                    sequences.0 += 1;
                    sequences.0
                }
                Role::Tenant => {
                    sequences.1 += 1;
                    sequences.1
                }
            };
            let account = Account {
                user_id: new_account.user_id.clone(),
                email: new_account.email.clone(),
                first_name: new_account.first_name.clone(),
                last_name: new_account.last_name.clone(),
                address: new_account.address.clone(),
                contact_number: new_account.contact_number.clone(),
                role,
                custom_id: format_custom_id(role.id_prefix(), value),
                created_at: Utc::now().naive_utc(),
            };
            accounts.push(account.clone());
            Ok(account)
        }

        fn get_by_user_id(&self, user_id: &str) -> Result<Option<Account>> {
            Ok(self
                .accounts
                .read()
                .unwrap()
                .iter()
                .find(|a| a.user_id == user_id)
                .cloned())
        }
    }

    fn new_account(user_id: &str) -> NewAccount {
        NewAccount {
            user_id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            first_name: None,
            last_name: None,
            address: None,
            contact_number: None,
        }
    }

    #[tokio::test]
    async fn first_registration_is_admin_then_tenants() {
        let service = AccountService::new(Arc::new(MockAccountRepository::new()));

        let first = service.register(new_account("u1")).await.unwrap();
        let second = service.register(new_account("u2")).await.unwrap();
        let third = service.register(new_account("u3")).await.unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(first.custom_id, "ADMIN-001");
        assert_eq!(second.role, Role::Tenant);
        assert_eq!(second.custom_id, "TENANT-001");
        assert_eq!(third.custom_id, "TENANT-002");
    }

    #[tokio::test]
    async fn registration_requires_user_id_and_email() {
        let service = AccountService::new(Arc::new(MockAccountRepository::new()));

        let mut missing_id = new_account("u1");
        missing_id.user_id = " ".to_string();
        assert!(matches!(
            service.register(missing_id).await,
            Err(Error::Validation(_))
        ));

        let mut missing_email = new_account("u1");
        missing_email.email = "".to_string();
        assert!(matches!(
            service.register(missing_email).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn lookup_of_unknown_account_is_not_found() {
        let service = AccountService::new(Arc::new(MockAccountRepository::new()));
        assert!(matches!(
            service.get_by_user_id("nobody"),
            Err(Error::NotFound(_))
        ));
    }
}
