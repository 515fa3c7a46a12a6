use thiserror::Error;

/// Errors raised by the bank-aggregation layer
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Bank provider credentials are not configured. Set PLAID_CLIENT_ID and PLAID_SECRET.")]
    NotConfigured,

    #[error("No linked accounts found")]
    NoLinkedAccounts,

    #[error("Bank provider request failed: {0}")]
    ApiRequestFailed(String),

    #[error("Failed to parse bank provider response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for BankError {
    fn from(err: reqwest::Error) -> Self {
        BankError::ApiRequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        BankError::InvalidResponse(err.to_string())
    }
}
