use async_trait::async_trait;
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::transactions::transactions_model::{
    CategorySummary, DateRange, NewTransaction, Transaction, TransactionFilters, TransactionUpdate,
};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        TransactionService {
            repository,
            account_repository,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list_transactions(
        &self,
        user_id: &str,
        filters: &TransactionFilters,
    ) -> Result<Vec<Transaction>> {
        self.repository.list(user_id, filters)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(user_id, transaction_id)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        // The referenced account must belong to the caller.
        let account = self
            .account_repository
            .get_by_id(user_id, &new_transaction.account_id)?;

        let now = chrono::Utc::now().naive_utc();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            account_id: account.id,
            amount: new_transaction.amount,
            transaction_type: new_transaction.transaction_type.to_string(),
            description: new_transaction.description,
            merchant_name: new_transaction.merchant_name,
            category: new_transaction.category.to_string(),
            subcategory: None,
            transaction_date: new_transaction.transaction_date.unwrap_or(now),
            is_pending: false,
            is_recurring: false,
            is_anomaly: false,
            confidence_score: None,
            notes: None,
            tags: None,
            plaid_transaction_id: None,
            created_at: now,
            updated_at: now,
        };
        debug!(
            "Creating transaction '{}' for user {}",
            transaction.description, user_id
        );
        self.repository.insert(transaction).await
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut transaction = self.repository.get_by_id(user_id, transaction_id)?;

        if let Some(category) = update.category {
            transaction.category = category.to_string();
        }
        if let Some(description) = update.description {
            transaction.description = description;
        }
        if let Some(notes) = update.notes {
            transaction.notes = Some(notes);
        }
        transaction.updated_at = chrono::Utc::now().naive_utc();

        self.repository.update(transaction).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        // Surfaces NotFound before queueing the delete.
        let transaction = self.repository.get_by_id(user_id, transaction_id)?;
        self.repository.delete(user_id, &transaction.id).await?;
        Ok(())
    }

    fn category_summary(&self, user_id: &str, range: &DateRange) -> Result<Vec<CategorySummary>> {
        let expenses = self.repository.load_expenses(user_id, range)?;

        let mut totals: HashMap<String, (Decimal, i64)> = HashMap::new();
        for transaction in &expenses {
            let amount = Decimal::from_f64_retain(transaction.amount).unwrap_or_default();
            let entry = totals
                .entry(transaction.category.clone())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += amount;
            entry.1 += 1;
        }

        let mut summaries: Vec<CategorySummary> = totals
            .into_iter()
            .map(|(category, (total, count))| {
                let total_f64 = total.to_f64().unwrap_or(0.0);
                CategorySummary {
                    category,
                    total: total_f64,
                    count,
                    average: if count > 0 {
                        total_f64 / count as f64
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        summaries.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
        Ok(summaries)
    }
}
