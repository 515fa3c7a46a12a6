use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Link token handed to the frontend to start the account-linking flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkToken {
    pub link_token: String,
    pub expiration: String,
}

/// Result of exchanging a public token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchange {
    pub access_token: String,
    pub item_id: String,
}

/// Account as reported by the aggregation provider
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderAccount {
    pub account_id: String,
    pub name: String,
    pub official_name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: String,
    pub subtype: Option<String>,
    pub balances: ProviderBalances,
    pub mask: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderBalances {
    pub available: Option<f64>,
    pub current: Option<f64>,
    pub limit: Option<f64>,
    pub iso_currency_code: Option<String>,
}

/// Transaction as reported by the aggregation provider.
/// Positive amounts are money moving out of the account.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTransaction {
    pub transaction_id: String,
    pub account_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub name: String,
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub pending: bool,
}

/// Outcome of a transaction sync run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub synced_transactions: usize,
    pub synced_accounts: usize,
}
