use async_trait::async_trait;

use crate::budgets::budgets_model::{
    Budget, BudgetOverview, BudgetUpdate, BudgetView, NewBudget,
};
use crate::errors::Result;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Budget>>;
    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
    async fn insert(&self, budget: Budget) -> Result<Budget>;
    async fn update(&self, budget: Budget) -> Result<Budget>;
    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str, is_active: Option<bool>) -> Result<Vec<BudgetView>>;
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<BudgetView>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()>;
    fn get_overview(&self, user_id: &str) -> Result<BudgetOverview>;
}
