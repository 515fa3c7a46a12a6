use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_TRANSACTION_PAGE_SIZE, MAX_TRANSACTION_PAGE_SIZE};
use crate::errors::ValidationError;
use crate::transactions::transactions_constants::*;
use crate::{Error, Result};

/// Enum representing the supported transaction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Groceries,
    Restaurants,
    Gas,
    Utilities,
    Entertainment,
    Medical,
    Shopping,
    Travel,
    Education,
    Charity,
    BankFees,
    Income,
    Transfer,
    Uncategorized,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Groceries => CATEGORY_GROCERIES,
            TransactionCategory::Restaurants => CATEGORY_RESTAURANTS,
            TransactionCategory::Gas => CATEGORY_GAS,
            TransactionCategory::Utilities => CATEGORY_UTILITIES,
            TransactionCategory::Entertainment => CATEGORY_ENTERTAINMENT,
            TransactionCategory::Medical => CATEGORY_MEDICAL,
            TransactionCategory::Shopping => CATEGORY_SHOPPING,
            TransactionCategory::Travel => CATEGORY_TRAVEL,
            TransactionCategory::Education => CATEGORY_EDUCATION,
            TransactionCategory::Charity => CATEGORY_CHARITY,
            TransactionCategory::BankFees => CATEGORY_BANK_FEES,
            TransactionCategory::Income => CATEGORY_INCOME,
            TransactionCategory::Transfer => CATEGORY_TRANSFER,
            TransactionCategory::Uncategorized => CATEGORY_UNCATEGORIZED,
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            CATEGORY_GROCERIES => Ok(TransactionCategory::Groceries),
            CATEGORY_RESTAURANTS => Ok(TransactionCategory::Restaurants),
            CATEGORY_GAS => Ok(TransactionCategory::Gas),
            CATEGORY_UTILITIES => Ok(TransactionCategory::Utilities),
            CATEGORY_ENTERTAINMENT => Ok(TransactionCategory::Entertainment),
            CATEGORY_MEDICAL => Ok(TransactionCategory::Medical),
            CATEGORY_SHOPPING => Ok(TransactionCategory::Shopping),
            CATEGORY_TRAVEL => Ok(TransactionCategory::Travel),
            CATEGORY_EDUCATION => Ok(TransactionCategory::Education),
            CATEGORY_CHARITY => Ok(TransactionCategory::Charity),
            CATEGORY_BANK_FEES => Ok(TransactionCategory::BankFees),
            CATEGORY_INCOME => Ok(TransactionCategory::Income),
            CATEGORY_TRANSFER => Ok(TransactionCategory::Transfer),
            CATEGORY_UNCATEGORIZED => Ok(TransactionCategory::Uncategorized),
            _ => Err(format!("Unknown transaction category: {}", s)),
        }
    }
}

/// Database model for transactions
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// Updates write the whole row back, so a None here really means NULL.
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub account_id: String,
    pub amount: f64,
    pub transaction_type: String,
    pub description: String,
    pub merchant_name: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub is_pending: bool,
    pub is_recurring: bool,
    pub is_anomaly: bool,
    pub confidence_score: Option<f64>,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub plaid_transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub account_id: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: String,
    pub merchant_name: Option<String>,
    #[serde(default = "default_category")]
    pub category: TransactionCategory,
    pub transaction_date: Option<NaiveDateTime>,
}

fn default_category() -> TransactionCategory {
    TransactionCategory::Uncategorized
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction description cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => TRANSACTION_TYPE_DEBIT,
            TransactionType::Credit => TRANSACTION_TYPE_CREDIT,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input model for updating a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub category: Option<TransactionCategory>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Listing filters; limits are clamped to the configured page-size cap.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    pub account_id: Option<String>,
    pub category: Option<TransactionCategory>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TransactionFilters {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_TRANSACTION_PAGE_SIZE)
            .clamp(1, MAX_TRANSACTION_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Spending aggregate for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
    pub count: i64,
    pub average: f64,
}

/// Date window used by summaries; both bounds optional.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}
