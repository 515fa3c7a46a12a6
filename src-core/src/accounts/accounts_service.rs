use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use crate::accounts::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::accounts::accounts_repository;
use crate::accounts::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for managing accounts
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
    fn get_active_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list(user_id, Some(true))
    }

    fn get_linked_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list_linked(user_id)
    }

    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(user_id, account_id)
    }

    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account '{}' for user {}", new_account.name, user_id);
        let account = new_account.into_account(Uuid::new_v4().to_string(), user_id.to_string());
        self.repository.insert(account).await
    }

    async fn update_account(
        &self,
        user_id: &str,
        account_id: &str,
        update: AccountUpdate,
    ) -> Result<Account> {
        update.validate()?;
        let mut account = self.repository.get_by_id(user_id, account_id)?;
        accounts_repository::apply_update(&mut account, update);
        self.repository.update(account).await
    }

    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<()> {
        // Soft delete: the row stays so historical transactions keep their
        // account reference.
        let account = self.repository.get_by_id(user_id, account_id)?;
        self.repository.deactivate(user_id, &account.id).await?;
        Ok(())
    }
}
