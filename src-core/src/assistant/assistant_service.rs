use async_trait::async_trait;
use log::warn;
use serde_json::json;
use std::sync::Arc;

use crate::accounts::AccountRepositoryTrait;
use crate::assistant::assistant_model::{AssistantReply, Insight};
use crate::assistant::completion_client::CompletionClient;
use crate::assistant::intent::{
    detect_intent, extract_search_terms, extract_time_period, Intent, TimePeriod,
};
use crate::budgets::BudgetServiceTrait;
use crate::errors::Result;
use crate::goals::GoalServiceTrait;
use crate::transactions::{TransactionRepositoryTrait, TransactionServiceTrait};

const SEARCH_RESULT_LIMIT: i64 = 20;

const ADVISOR_SYSTEM_PROMPT: &str = "You are a helpful personal finance advisor.";

/// Trait for assistant operations
#[async_trait]
pub trait AssistantServiceTrait: Send + Sync {
    async fn chat(&self, user_id: &str, query: &str) -> Result<AssistantReply>;
    async fn insights(&self, user_id: &str) -> Result<Vec<Insight>>;
}

pub struct AssistantService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    budget_service: Arc<dyn BudgetServiceTrait>,
    goal_service: Arc<dyn GoalServiceTrait>,
    completion_client: Option<CompletionClient>,
}

impl AssistantService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        budget_service: Arc<dyn BudgetServiceTrait>,
        goal_service: Arc<dyn GoalServiceTrait>,
        completion_client: Option<CompletionClient>,
    ) -> Self {
        AssistantService {
            account_repository,
            transaction_repository,
            transaction_service,
            budget_service,
            goal_service,
            completion_client,
        }
    }

    fn spending_summary(&self, user_id: &str, period: TimePeriod) -> Result<AssistantReply> {
        let range = period.date_range();
        let summaries = self.transaction_service.category_summary(user_id, &range)?;

        let total_spent: f64 = summaries.iter().map(|s| s.total).sum();
        let transaction_count: i64 = summaries.iter().map(|s| s.count).sum();
        let top_categories: Vec<_> = summaries.iter().take(5).collect();

        let mut message = format!(
            "You spent ${:.2} {} across {} transactions.",
            total_spent,
            period.label(),
            transaction_count
        );
        if let Some(top) = top_categories.first() {
            message.push_str(&format!(
                " Your biggest expense category was {} at ${:.2}.",
                top.category, top.total
            ));
        }

        Ok(AssistantReply::new(
            Intent::SpendingSummary.as_str(),
            message,
            json!({
                "period": period.label(),
                "totalSpent": total_spent,
                "transactionCount": transaction_count,
                "topCategories": top_categories,
            }),
        ))
    }

    fn budget_status(&self, user_id: &str) -> Result<AssistantReply> {
        let budgets = self.budget_service.get_budgets(user_id, Some(true))?;

        let total_budgeted: f64 = budgets.iter().map(|b| b.budget.amount).sum();
        let total_spent: f64 = budgets.iter().map(|b| b.spent_amount).sum();
        let statuses: Vec<_> = budgets
            .iter()
            .map(|b| {
                json!({
                    "category": b.budget.category,
                    "budgeted": b.budget.amount,
                    "spent": b.spent_amount,
                    "remaining": b.remaining_amount,
                    "percentageUsed": b.percentage_used,
                    "overBudget": b.over_budget,
                })
            })
            .collect();

        let message = format!(
            "You have {} active budgets. You've spent ${:.2} out of ${:.2} budgeted this month.",
            budgets.len(),
            total_spent,
            total_budgeted
        );

        Ok(AssistantReply::new(
            Intent::BudgetStatus.as_str(),
            message,
            json!({
                "budgets": statuses,
                "totalBudgeted": total_budgeted,
                "totalSpent": total_spent,
                "overallRemaining": total_budgeted - total_spent,
            }),
        ))
    }

    fn transaction_search(&self, user_id: &str, query: &str) -> Result<AssistantReply> {
        let terms = extract_search_terms(query);
        let range = extract_time_period(query).date_range();
        let transactions =
            self.transaction_repository
                .search(user_id, &terms, &range, SEARCH_RESULT_LIMIT)?;

        let rows: Vec<_> = transactions
            .iter()
            .map(|t| {
                json!({
                    "date": t.transaction_date.format("%Y-%m-%d").to_string(),
                    "description": t.description,
                    "amount": t.amount,
                    "category": t.category,
                    "merchant": t.merchant_name,
                })
            })
            .collect();

        let message = format!("Found {} transactions matching your search.", rows.len());
        Ok(AssistantReply::new(
            Intent::TransactionSearch.as_str(),
            message,
            json!({
                "transactions": rows,
                "count": rows.len(),
                "searchTerms": terms,
            }),
        ))
    }

    fn goal_progress(&self, user_id: &str) -> Result<AssistantReply> {
        let goals = self.goal_service.get_goals(user_id)?;
        let rows: Vec<_> = goals
            .iter()
            .map(|g| {
                json!({
                    "name": g.goal.name,
                    "targetAmount": g.goal.target_amount,
                    "currentAmount": g.goal.current_amount,
                    "remaining": g.remaining_amount,
                    "progressPercentage": g.progress_percentage,
                    "targetDate": g.goal.target_date,
                })
            })
            .collect();

        let message = format!("You have {} active savings goals.", goals.len());
        Ok(AssistantReply::new(
            Intent::GoalProgress.as_str(),
            message,
            json!({ "goals": rows }),
        ))
    }

    fn category_analysis(&self, user_id: &str, period: TimePeriod) -> Result<AssistantReply> {
        let range = period.date_range();
        let summaries = self.transaction_service.category_summary(user_id, &range)?;

        let message = format!(
            "Here's your spending breakdown by category for {}.",
            period.label()
        );
        Ok(AssistantReply::new(
            Intent::CategoryAnalysis.as_str(),
            message,
            json!({
                "period": period.label(),
                "categories": summaries,
            }),
        ))
    }

    fn net_worth(&self, user_id: &str) -> Result<AssistantReply> {
        let accounts = self.account_repository.list(user_id, Some(true))?;

        let mut assets = 0.0;
        let mut liabilities = 0.0;
        let rows: Vec<_> = accounts
            .iter()
            .map(|account| {
                let balance = account.current_balance;
                let is_liability = account.account_type_parsed().is_liability();
                if is_liability {
                    liabilities += balance.abs();
                } else {
                    assets += balance;
                }
                json!({
                    "name": account.name,
                    "type": account.account_type,
                    "balance": balance,
                    "institution": account.institution_name,
                    "category": if is_liability { "liability" } else { "asset" },
                })
            })
            .collect();

        let net_worth = assets - liabilities;
        let message = format!(
            "Your current net worth is ${:.2}. You have ${:.2} in assets and ${:.2} in liabilities across {} accounts.",
            net_worth,
            assets,
            liabilities,
            accounts.len()
        );

        Ok(AssistantReply::new(
            Intent::NetWorth.as_str(),
            message,
            json!({
                "netWorth": net_worth,
                "totalAssets": assets,
                "totalLiabilities": liabilities,
                "accounts": rows,
            }),
        ))
    }

    fn account_summary(&self, user_id: &str) -> Result<AssistantReply> {
        let accounts = self.account_repository.list(user_id, Some(true))?;
        let total_balance: f64 = accounts.iter().map(|a| a.current_balance).sum();
        let linked = accounts.iter().filter(|a| !a.is_manual).count();
        let manual = accounts.len() - linked;

        let mut rows: Vec<_> = accounts
            .iter()
            .map(|account| {
                json!({
                    "name": account.name,
                    "type": account.account_type,
                    "balance": account.current_balance,
                    "institution": account
                        .institution_name
                        .clone()
                        .unwrap_or_else(|| "Manual Account".to_string()),
                    "isLinked": !account.is_manual,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            let balance_of = |v: &serde_json::Value| v["balance"].as_f64().unwrap_or(0.0);
            balance_of(b)
                .partial_cmp(&balance_of(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let message = format!(
            "You have {} accounts with a total balance of ${:.2}. {} are linked and {} are manual.",
            accounts.len(),
            total_balance,
            linked,
            manual
        );

        Ok(AssistantReply::new(
            Intent::AccountSummary.as_str(),
            message,
            json!({
                "accounts": rows,
                "totalAccounts": accounts.len(),
                "totalBalance": total_balance,
                "linkedAccounts": linked,
                "manualAccounts": manual,
            }),
        ))
    }

    async fn financial_advice(&self, user_id: &str, query: &str) -> Result<AssistantReply> {
        let Some(client) = self.completion_client.as_ref() else {
            return Ok(AssistantReply::new(
                Intent::FinancialAdvice.as_str(),
                "AI advice is not configured. Please set up an API key.".to_string(),
                serde_json::Value::Null,
            ));
        };

        let range = TimePeriod::Last30Days.date_range();
        let summaries = self.transaction_service.category_summary(user_id, &range)?;
        let recent_spending: f64 = summaries.iter().map(|s| s.total).sum();
        let top_categories: Vec<&str> = summaries
            .iter()
            .take(3)
            .map(|s| s.category.as_str())
            .collect();
        let account_count = self.account_repository.list(user_id, Some(true))?.len();
        let budget_count = self.budget_service.get_budgets(user_id, Some(true))?.len();
        let goal_count = self.goal_service.get_goals(user_id)?.len();

        let prompt = format!(
            "Based on the user's financial data, provide helpful advice.\n\
             \n\
             User's financial context:\n\
             - Total accounts: {}\n\
             - Recent spending: ${:.2} in the last 30 days\n\
             - Top spending categories: {}\n\
             - Active budgets: {}\n\
             - Savings goals: {}\n\
             \n\
             User question: {}\n\
             \n\
             Provide specific, actionable financial advice in 2-3 sentences.",
            account_count,
            recent_spending,
            top_categories.join(", "),
            budget_count,
            goal_count,
            query
        );

        match client.complete(ADVISOR_SYSTEM_PROMPT, &prompt).await {
            Ok(advice) => Ok(AssistantReply::new(
                Intent::FinancialAdvice.as_str(),
                advice,
                json!({
                    "accountCount": account_count,
                    "recentSpending": recent_spending,
                    "topCategories": top_categories,
                    "budgetCount": budget_count,
                    "goalCount": goal_count,
                }),
            )),
            Err(e) => {
                warn!("Completion request failed: {}", e);
                Ok(AssistantReply::new(
                    Intent::FinancialAdvice.as_str(),
                    "I'm having trouble accessing my AI capabilities right now. Please try again later."
                        .to_string(),
                    serde_json::Value::Null,
                ))
            }
        }
    }

    fn general_chat(&self) -> AssistantReply {
        AssistantReply::new(
            Intent::GeneralChat.as_str(),
            "I'm your personal finance assistant! I can help you with spending summaries, \
             budget tracking, transaction searches, and financial advice. What would you like \
             to know about your finances?"
                .to_string(),
            json!({
                "suggestions": [
                    "How much did I spend last month?",
                    "Show me my budget status",
                    "Find transactions at Starbucks",
                    "What's my biggest expense category?",
                    "How are my savings goals doing?",
                ]
            }),
        )
    }
}

#[async_trait]
impl AssistantServiceTrait for AssistantService {
    async fn chat(&self, user_id: &str, query: &str) -> Result<AssistantReply> {
        let period = extract_time_period(query);
        match detect_intent(query) {
            Intent::NetWorth => self.net_worth(user_id),
            Intent::AccountSummary => self.account_summary(user_id),
            Intent::SpendingSummary => self.spending_summary(user_id, period),
            Intent::BudgetStatus => self.budget_status(user_id),
            Intent::TransactionSearch => self.transaction_search(user_id, query),
            Intent::FinancialAdvice => self.financial_advice(user_id, query).await,
            Intent::GoalProgress => self.goal_progress(user_id),
            Intent::CategoryAnalysis => self.category_analysis(user_id, period),
            Intent::GeneralChat => Ok(self.general_chat()),
        }
    }

    async fn insights(&self, user_id: &str) -> Result<Vec<Insight>> {
        let mut insights = Vec::new();

        let spending = self.spending_summary(user_id, TimePeriod::LastMonth)?;
        if spending.data["totalSpent"].as_f64().unwrap_or(0.0) > 0.0 {
            insights.push(Insight {
                kind: "spending".to_string(),
                title: "Monthly Spending Summary".to_string(),
                data: spending,
            });
        }

        let budgets = self.budget_status(user_id)?;
        if budgets.data["budgets"]
            .as_array()
            .map(|b| !b.is_empty())
            .unwrap_or(false)
        {
            insights.push(Insight {
                kind: "budget".to_string(),
                title: "Budget Status".to_string(),
                data: budgets,
            });
        }

        let categories = self.category_analysis(user_id, TimePeriod::Last30Days)?;
        if categories.data["categories"]
            .as_array()
            .map(|c| !c.is_empty())
            .unwrap_or(false)
        {
            insights.push(Insight {
                kind: "category".to_string(),
                title: "Spending by Category".to_string(),
                data: categories,
            });
        }

        let goals = self.goal_progress(user_id)?;
        if goals.data["goals"]
            .as_array()
            .map(|g| !g.is_empty())
            .unwrap_or(false)
        {
            insights.push(Insight {
                kind: "goals".to_string(),
                title: "Savings Goals Progress".to_string(),
                data: goals,
            });
        }

        Ok(insights)
    }
}
