use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Utc};
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use crate::budgets::budgets_model::{
    Budget, BudgetOverview, BudgetTotals, BudgetUpdate, BudgetView, GoalTotals, NewBudget,
};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::Result;
use crate::goals::GoalRepositoryTrait;
use crate::transactions::{DateRange, TransactionRepositoryTrait};

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        BudgetService {
            repository,
            transaction_repository,
            goal_repository,
        }
    }

    fn spent_for(&self, user_id: &str, budget: &Budget) -> Result<f64> {
        let range = DateRange {
            start_date: Some(budget.start_date),
            end_date: Some(budget.end_date),
        };
        self.transaction_repository
            .sum_category_spent(user_id, &budget.category, &range)
    }

    fn first_of_current_month() -> NaiveDateTime {
        let today = Utc::now().naive_utc().date();
        today
            .with_day(1)
            .expect("first of month is always valid")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: &str, is_active: Option<bool>) -> Result<Vec<BudgetView>> {
        let budgets = self.repository.list(user_id, is_active)?;
        budgets
            .into_iter()
            .map(|budget| {
                let spent = self.spent_for(user_id, &budget)?;
                Ok(BudgetView::from_spent(budget, spent))
            })
            .collect()
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;

        let start_date = new_budget
            .start_date
            .unwrap_or_else(Self::first_of_current_month);
        let end_date = new_budget
            .end_date
            .unwrap_or_else(|| new_budget.period.default_end(start_date));

        let now = Utc::now().naive_utc();
        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_budget.name,
            category: new_budget.category.to_string(),
            amount: new_budget.amount,
            period: new_budget.period.to_string(),
            start_date,
            end_date,
            is_active: true,
            auto_renew: false,
            alert_threshold: 80.0,
            created_at: now,
            updated_at: now,
        };
        debug!("Creating budget '{}' for user {}", budget.name, user_id);
        self.repository.insert(budget).await
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<BudgetView> {
        let mut budget = self.repository.get_by_id(user_id, budget_id)?;

        if let Some(name) = update.name {
            budget.name = name;
        }
        if let Some(amount) = update.amount {
            budget.amount = amount;
        }
        if let Some(is_active) = update.is_active {
            budget.is_active = is_active;
        }
        budget.updated_at = Utc::now().naive_utc();

        let updated = self.repository.update(budget).await?;
        let spent = self.spent_for(user_id, &updated)?;
        Ok(BudgetView::from_spent(updated, spent))
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()> {
        let budget = self.repository.get_by_id(user_id, budget_id)?;
        self.repository.delete(user_id, &budget.id).await?;
        Ok(())
    }

    fn get_overview(&self, user_id: &str) -> Result<BudgetOverview> {
        let budgets = self.repository.list(user_id, Some(true))?;

        let mut total_budgeted = 0.0;
        let mut total_spent = 0.0;
        let mut over_budget_count = 0;
        for budget in &budgets {
            let spent = self.spent_for(user_id, budget)?;
            total_budgeted += budget.amount;
            total_spent += spent;
            if spent > budget.amount {
                over_budget_count += 1;
            }
        }

        let goals = self.goal_repository.list(user_id, Some(true))?;
        let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
        let total_current: f64 = goals.iter().map(|g| g.current_amount).sum();
        let achieved_goals = goals.iter().filter(|g| g.is_achieved).count();

        Ok(BudgetOverview {
            budgets: BudgetTotals {
                total_budgets: budgets.len(),
                total_budgeted,
                total_spent,
                remaining: total_budgeted - total_spent,
                over_budget_count,
                budget_utilization: if total_budgeted > 0.0 {
                    (total_spent / total_budgeted) * 100.0
                } else {
                    0.0
                },
            },
            goals: GoalTotals {
                total_goals: goals.len(),
                achieved_goals,
                total_target,
                total_current,
                overall_progress: if total_target > 0.0 {
                    (total_current / total_target) * 100.0
                } else {
                    0.0
                },
            },
        })
    }
}
