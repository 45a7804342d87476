mod accounts_model;
mod accounts_repository;
mod accounts_service;
mod accounts_traits;

pub use accounts_model::{Account, CurrentUser, NewAccount, Role};
pub use accounts_repository::AccountRepository;
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountRepositoryTrait, AccountServiceTrait, CurrentUserProviderTrait};
