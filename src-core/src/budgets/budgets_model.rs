use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::transactions::TransactionCategory;
use crate::{Error, Result};

/// Budgeting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Quarterly => "quarterly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    /// Default window end for a budget starting at `start`.
    pub fn default_end(&self, start: NaiveDateTime) -> NaiveDateTime {
        match self {
            BudgetPeriod::Weekly => start + Duration::days(6),
            BudgetPeriod::Monthly => {
                let last_day = last_day_of_month(start.date());
                NaiveDateTime::new(last_day, end_of_day())
            }
            BudgetPeriod::Quarterly => start + Duration::days(90),
            BudgetPeriod::Yearly => {
                let next_year = start
                    .date()
                    .with_year(start.date().year() + 1)
                    .unwrap_or(start.date());
                NaiveDateTime::new(next_year - Duration::days(1), end_of_day())
            }
        }
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).expect("valid time")
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid date") - Duration::days(1)
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "quarterly" => Ok(BudgetPeriod::Quarterly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            _ => Err(format!("Unknown budget period: {}", s)),
        }
    }
}

/// Database model for budgets
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub period: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_active: bool,
    pub auto_renew: bool,
    pub alert_threshold: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub name: String,
    pub category: TransactionCategory,
    pub amount: f64,
    #[serde(default = "default_period")]
    pub period: BudgetPeriod,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

fn default_period() -> BudgetPeriod {
    BudgetPeriod::Monthly
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget name cannot be empty".to_string(),
            )));
        }
        if self.amount < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget amount cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating a budget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub is_active: Option<bool>,
}

/// Budget enriched with the amounts derived from matching transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    #[serde(flatten)]
    pub budget: Budget,
    pub spent_amount: f64,
    pub remaining_amount: f64,
    pub percentage_used: f64,
    pub over_budget: bool,
}

impl BudgetView {
    pub fn from_spent(budget: Budget, spent: f64) -> Self {
        let remaining = budget.amount - spent;
        let percentage_used = if budget.amount > 0.0 {
            (spent / budget.amount) * 100.0
        } else {
            0.0
        };
        let over_budget = spent > budget.amount;
        BudgetView {
            budget,
            spent_amount: spent,
            remaining_amount: remaining,
            percentage_used,
            over_budget,
        }
    }
}

/// Aggregate view across active budgets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotals {
    pub total_budgets: usize,
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub over_budget_count: usize,
    pub budget_utilization: f64,
}

/// Aggregate view across active goals, reported next to the budget totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTotals {
    pub total_goals: usize,
    pub achieved_goals: usize,
    pub total_target: f64,
    pub total_current: f64,
    pub overall_progress: f64,
}

/// Combined budgets-and-goals summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub budgets: BudgetTotals,
    pub goals: GoalTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn monthly_default_end_is_last_day_of_month() {
        let end = BudgetPeriod::Monthly.default_end(midnight(2025, 2, 1));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

        let end = BudgetPeriod::Monthly.default_end(midnight(2024, 2, 1));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let end = BudgetPeriod::Monthly.default_end(midnight(2025, 12, 1));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn weekly_default_end_is_six_days_out() {
        let end = BudgetPeriod::Weekly.default_end(midnight(2025, 3, 3));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }

    #[test]
    fn exactly_spent_budget_is_not_over() {
        let budget = Budget {
            id: "b1".into(),
            user_id: "u1".into(),
            name: "Groceries".into(),
            category: "groceries".into(),
            amount: 200.0,
            period: "monthly".into(),
            start_date: midnight(2025, 3, 1),
            end_date: midnight(2025, 3, 31),
            is_active: true,
            auto_renew: false,
            alert_threshold: 80.0,
            created_at: midnight(2025, 3, 1),
            updated_at: midnight(2025, 3, 1),
        };
        let view = BudgetView::from_spent(budget.clone(), 200.0);
        assert_eq!(view.percentage_used, 100.0);
        assert!(!view.over_budget);
        assert_eq!(view.remaining_amount, 0.0);

        let view = BudgetView::from_spent(budget, 200.01);
        assert!(view.over_budget);
    }

    #[test]
    fn zero_amount_budget_reports_zero_usage() {
        let budget = Budget {
            id: "b2".into(),
            user_id: "u1".into(),
            name: "Nothing".into(),
            category: "shopping".into(),
            amount: 0.0,
            period: "monthly".into(),
            start_date: midnight(2025, 3, 1),
            end_date: midnight(2025, 3, 31),
            is_active: true,
            auto_renew: false,
            alert_threshold: 80.0,
            created_at: midnight(2025, 3, 1),
            updated_at: midnight(2025, 3, 1),
        };
        let view = BudgetView::from_spent(budget, 10.0);
        assert_eq!(view.percentage_used, 0.0);
        assert!(view.over_budget);
    }
}
