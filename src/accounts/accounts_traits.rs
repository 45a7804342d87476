use async_trait::async_trait;

use crate::accounts::accounts_model::{Account, CurrentUser, NewAccount};
use crate::errors::Result;

/// Trait for account repository operations
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Registers a new account. The user count check, the role assignment
    /// and the custom-ID draw all happen inside one store transaction.
    async fn register(&self, new_account: &NewAccount) -> Result<Account>;

    fn get_by_user_id(&self, user_id: &str) -> Result<Option<Account>>;
}

/// Trait for account service operations
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, new_account: NewAccount) -> Result<Account>;

    fn get_by_user_id(&self, user_id: &str) -> Result<Account>;
}

/// Seam to the external identity provider. The billing coordinator resolves
/// the active tenant's invoice id through this.
pub trait CurrentUserProviderTrait: Send + Sync {
    /// The signed-in user, or None when no session is active.
    fn current_user(&self) -> Result<Option<CurrentUser>>;
}
