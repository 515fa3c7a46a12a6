use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Supported account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Investment,
    Loan,
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::CreditCard => "credit_card",
            AccountType::Investment => "investment",
            AccountType::Loan => "loan",
            AccountType::Other => "other",
        }
    }

    /// Debt accounts count against net worth.
    pub fn is_liability(&self) -> bool {
        matches!(self, AccountType::CreditCard | AccountType::Loan)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            "credit_card" | "credit card" | "credit" => Ok(AccountType::CreditCard),
            "investment" | "brokerage" => Ok(AccountType::Investment),
            "loan" | "mortgage" => Ok(AccountType::Loan),
            "other" => Ok(AccountType::Other),
            _ => Err(format!("Unknown account type: {}", s)),
        }
    }
}

/// Sync status values stored on the account row.
pub const SYNC_STATUS_MANUAL: &str = "manual";
pub const SYNC_STATUS_ACTIVE: &str = "active";
pub const SYNC_STATUS_ERROR: &str = "error";

/// Database model for accounts
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
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// Updates write the whole row back, so a None here really means NULL.
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub institution_name: Option<String>,
    pub current_balance: f64,
    pub available_balance: Option<f64>,
    pub credit_limit: Option<f64>,
    pub is_manual: bool,
    pub sync_status: String,
    pub plaid_account_id: Option<String>,
    pub plaid_item_id: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub last_sync: Option<NaiveDateTime>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    pub fn account_type_parsed(&self) -> AccountType {
        AccountType::from_str(&self.account_type).unwrap_or(AccountType::Other)
    }

    pub fn is_linked(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Input model for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub account_type: AccountType,
    pub institution_name: Option<String>,
    #[serde(default = "default_is_manual")]
    pub is_manual: bool,
}

fn default_is_manual() -> bool {
    true
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    pub(crate) fn into_account(self, id: String, user_id: String) -> Account {
        let now = chrono::Utc::now().naive_utc();
        let sync_status = if self.is_manual {
            SYNC_STATUS_MANUAL
        } else {
            SYNC_STATUS_ACTIVE
        };
        Account {
            id,
            user_id,
            name: self.name,
            account_type: self.account_type.to_string(),
            institution_name: self.institution_name,
            current_balance: 0.0,
            available_balance: None,
            credit_limit: None,
            is_manual: self.is_manual,
            sync_status: sync_status.to_string(),
            plaid_account_id: None,
            plaid_item_id: None,
            access_token: None,
            last_sync: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input model for updating an existing account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub current_balance: Option<f64>,
}

impl AccountUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Account name cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }
}
