use chrono::NaiveDateTime;
use fintrack_core::accounts as core_accounts;
use fintrack_core::users as core_users;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account representation exposed over the API. Provider credentials never
/// leave the core layer.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub institution_name: Option<String>,
    pub current_balance: f64,
    pub available_balance: Option<f64>,
    pub credit_limit: Option<f64>,
    pub is_manual: bool,
    pub sync_status: String,
    pub last_sync: Option<NaiveDateTime>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_accounts::Account> for Account {
    fn from(a: core_accounts::Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            account_type: a.account_type,
            institution_name: a.institution_name,
            current_balance: a.current_balance,
            available_balance: a.available_balance,
            credit_limit: a.credit_limit,
            is_manual: a.is_manual,
            sync_status: a.sync_status,
            last_sync: a.last_sync,
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    #[schema(value_type = String, example = "checking")]
    pub account_type: core_accounts::AccountType,
    pub institution_name: Option<String>,
    #[serde(default = "default_is_manual")]
    pub is_manual: bool,
}

fn default_is_manual() -> bool {
    true
}

impl From<NewAccount> for core_accounts::NewAccount {
    fn from(a: NewAccount) -> Self {
        Self {
            name: a.name,
            account_type: a.account_type,
            institution_name: a.institution_name,
            is_manual: a.is_manual,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub current_balance: Option<f64>,
}

impl From<AccountUpdate> for core_accounts::AccountUpdate {
    fn from(a: AccountUpdate) -> Self {
        Self {
            name: a.name,
            current_balance: a.current_balance,
        }
    }
}

/// User profile exposed over the API.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub currency: String,
    pub timezone: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

impl From<core_users::User> for UserProfile {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            currency: u.currency,
            timezone: u.timezone,
            is_active: u.is_active,
            is_verified: u.is_verified,
            created_at: u.created_at,
        }
    }
}
