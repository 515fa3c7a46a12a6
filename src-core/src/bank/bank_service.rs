use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{error, info};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::accounts::{Account, AccountRepositoryTrait, AccountType, SYNC_STATUS_ACTIVE};
use crate::bank::bank_errors::BankError;
use crate::bank::bank_model::{LinkToken, ProviderAccount, ProviderTransaction, SyncOutcome};
use crate::bank::bank_traits::BankServiceTrait;
use crate::bank::plaid_client::PlaidClient;
use crate::errors::Result;
use crate::transactions::transactions_constants::{
    TRANSACTION_TYPE_CREDIT, TRANSACTION_TYPE_DEBIT,
};
use crate::transactions::{categorize, Transaction, TransactionRepositoryTrait};

/// Window of provider history pulled on each sync run.
const SYNC_WINDOW_DAYS: i64 = 30;

pub struct BankService {
    client: Option<PlaidClient>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl BankService {
    pub fn new(
        client: Option<PlaidClient>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        BankService {
            client,
            account_repository,
            transaction_repository,
        }
    }

    fn client(&self) -> std::result::Result<&PlaidClient, BankError> {
        self.client.as_ref().ok_or(BankError::NotConfigured)
    }

    fn build_linked_account(
        user_id: &str,
        provider_account: &ProviderAccount,
        access_token: &str,
        item_id: &str,
    ) -> Account {
        let now = Utc::now().naive_utc();
        let account_type = provider_account
            .subtype
            .as_deref()
            .and_then(|s| AccountType::from_str(s).ok())
            .unwrap_or(AccountType::Other);
        Account {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: provider_account.name.clone(),
            account_type: account_type.to_string(),
            institution_name: provider_account.official_name.clone(),
            current_balance: provider_account.balances.current.unwrap_or(0.0),
            available_balance: provider_account.balances.available,
            credit_limit: provider_account.balances.limit,
            is_manual: false,
            sync_status: SYNC_STATUS_ACTIVE.to_string(),
            plaid_account_id: Some(provider_account.account_id.clone()),
            plaid_item_id: Some(item_id.to_string()),
            access_token: Some(access_token.to_string()),
            last_sync: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn build_transaction(user_id: &str, account_id: &str, item: &ProviderTransaction) -> Transaction {
        let now = Utc::now().naive_utc();
        let category = categorize(&item.name, item.merchant_name.as_deref(), &item.category);
        let transaction_type = if item.amount > 0.0 {
            TRANSACTION_TYPE_DEBIT
        } else {
            TRANSACTION_TYPE_CREDIT
        };
        Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            account_id: account_id.to_string(),
            amount: item.amount.abs(),
            transaction_type: transaction_type.to_string(),
            description: item.name.clone(),
            merchant_name: item.merchant_name.clone(),
            category: category.to_string(),
            subcategory: None,
            transaction_date: item.date.and_hms_opt(0, 0, 0).expect("midnight is valid"),
            is_pending: item.pending,
            is_recurring: false,
            is_anomaly: false,
            confidence_score: None,
            notes: None,
            tags: None,
            plaid_transaction_id: Some(item.transaction_id.clone()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Syncs one linked account; returns how many transactions were stored.
    async fn sync_account(&self, user_id: &str, account: &Account) -> Result<usize> {
        let client = self.client()?;
        let access_token = account
            .access_token
            .as_deref()
            .ok_or(BankError::NoLinkedAccounts)?;
        let plaid_account_id = account
            .plaid_account_id
            .clone()
            .ok_or_else(|| BankError::InvalidResponse("Linked account has no provider id".into()))?;

        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(SYNC_WINDOW_DAYS);
        let ids = [plaid_account_id.clone()];
        let items = client
            .get_transactions(access_token, start_date, end_date, Some(&ids))
            .await
            .map_err(crate::Error::Bank)?;

        let mut stored = 0;
        for item in &items {
            if self
                .transaction_repository
                .exists_by_plaid_transaction_id(&item.transaction_id)?
            {
                continue;
            }
            let transaction = Self::build_transaction(user_id, &account.id, item);
            self.transaction_repository.insert(transaction).await?;
            stored += 1;
        }

        // Refresh the balance from the provider's current view.
        let provider_accounts = client
            .get_accounts(access_token)
            .await
            .map_err(crate::Error::Bank)?;
        if let Some(provider_account) = provider_accounts
            .iter()
            .find(|a| a.account_id == plaid_account_id)
        {
            self.account_repository
                .record_sync(
                    &account.id,
                    provider_account.balances.current.unwrap_or(0.0),
                    provider_account.balances.available,
                    Utc::now().naive_utc(),
                )
                .await?;
        }

        Ok(stored)
    }
}

#[async_trait]
impl BankServiceTrait for BankService {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn create_link_token(&self, user_id: &str) -> Result<LinkToken> {
        let client = self.client()?;
        Ok(client
            .create_link_token(user_id)
            .await
            .map_err(crate::Error::Bank)?)
    }

    async fn exchange_public_token(
        &self,
        user_id: &str,
        public_token: &str,
    ) -> Result<Vec<Account>> {
        let client = self.client()?;
        let exchange = client
            .exchange_public_token(public_token)
            .await
            .map_err(crate::Error::Bank)?;
        let provider_accounts = client
            .get_accounts(&exchange.access_token)
            .await
            .map_err(crate::Error::Bank)?;

        let mut created = Vec::new();
        for provider_account in &provider_accounts {
            let existing = self
                .account_repository
                .find_by_plaid_account_id(user_id, &provider_account.account_id)?;
            if existing.is_some() {
                continue;
            }
            let account = Self::build_linked_account(
                user_id,
                provider_account,
                &exchange.access_token,
                &exchange.item_id,
            );
            created.push(self.account_repository.insert(account).await?);
        }

        info!(
            "Linked {} provider accounts for user {}",
            created.len(),
            user_id
        );
        Ok(created)
    }

    async fn sync_transactions(&self, user_id: &str) -> Result<SyncOutcome> {
        // Surface missing credentials before touching the database.
        self.client()?;

        let linked = self.account_repository.list_linked(user_id)?;
        if linked.is_empty() {
            return Err(crate::Error::Bank(BankError::NoLinkedAccounts));
        }

        let mut synced_transactions = 0;
        for account in &linked {
            match self.sync_account(user_id, account).await {
                Ok(stored) => synced_transactions += stored,
                Err(e) => {
                    // One failing account must not abort the whole run.
                    error!("Error syncing account {}: {}", account.name, e);
                }
            }
        }

        Ok(SyncOutcome {
            synced_transactions,
            synced_accounts: linked.len(),
        })
    }
}
