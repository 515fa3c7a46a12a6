use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::accounts::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait for account repository operations
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
    fn list_linked(&self, user_id: &str) -> Result<Vec<Account>>;
    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Account>;
    fn find_by_plaid_account_id(
        &self,
        user_id: &str,
        plaid_account_id: &str,
    ) -> Result<Option<Account>>;
    async fn insert(&self, account: Account) -> Result<Account>;
    async fn update(&self, account: Account) -> Result<Account>;
    async fn deactivate(&self, user_id: &str, account_id: &str) -> Result<usize>;
    async fn record_sync(
        &self,
        account_id: &str,
        current_balance: f64,
        available_balance: Option<f64>,
        synced_at: NaiveDateTime,
    ) -> Result<()>;
}

/// Trait for account service operations
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    fn get_active_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
    fn get_linked_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account>;
    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account>;
    async fn update_account(
        &self,
        user_id: &str,
        account_id: &str,
        update: AccountUpdate,
    ) -> Result<Account>;
    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<()>;
}
