use async_trait::async_trait;

use crate::accounts::Account;
use crate::bank::bank_model::{LinkToken, SyncOutcome};
use crate::errors::Result;

/// Trait for the bank-aggregation service
#[async_trait]
pub trait BankServiceTrait: Send + Sync {
    /// Whether provider credentials are configured.
    fn is_configured(&self) -> bool;
    async fn create_link_token(&self, user_id: &str) -> Result<LinkToken>;
    /// Exchanges the public token and links the provider's accounts.
    /// Returns the newly created accounts.
    async fn exchange_public_token(
        &self,
        user_id: &str,
        public_token: &str,
    ) -> Result<Vec<Account>>;
    /// Pulls recent provider transactions into every linked account.
    async fn sync_transactions(&self, user_id: &str) -> Result<SyncOutcome>;
}
