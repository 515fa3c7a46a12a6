use async_trait::async_trait;

use crate::errors::Result;
use crate::transactions::transactions_model::{
    CategorySummary, DateRange, NewTransaction, Transaction, TransactionFilters, TransactionUpdate,
};

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str, filters: &TransactionFilters) -> Result<Vec<Transaction>>;
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn exists_by_plaid_transaction_id(&self, plaid_transaction_id: &str) -> Result<bool>;
    /// Positive-amount (expense) transactions inside the window, oldest first.
    fn load_expenses(&self, user_id: &str, range: &DateRange) -> Result<Vec<Transaction>>;
    fn search(&self, user_id: &str, terms: &[String], range: &DateRange, limit: i64)
        -> Result<Vec<Transaction>>;
    fn sum_category_spent(
        &self,
        user_id: &str,
        category: &str,
        range: &DateRange,
    ) -> Result<f64>;
    async fn insert(&self, transaction: Transaction) -> Result<Transaction>;
    async fn update(&self, transaction: Transaction) -> Result<Transaction>;
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(
        &self,
        user_id: &str,
        filters: &TransactionFilters,
    ) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
    fn category_summary(&self, user_id: &str, range: &DateRange) -> Result<Vec<CategorySummary>>;
}
