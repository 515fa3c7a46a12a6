use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::bank::bank_errors::BankError;
use crate::bank::bank_model::{LinkToken, ProviderAccount, ProviderTransaction, TokenExchange};

static SANDBOX_HOST: &str = "https://sandbox.plaid.com";
static DEVELOPMENT_HOST: &str = "https://development.plaid.com";
static PRODUCTION_HOST: &str = "https://production.plaid.com";

const CLIENT_NAME: &str = "FinTrack";
const TRANSACTIONS_PAGE_SIZE: u32 = 100;

/// Thin JSON client over the Plaid REST API.
pub struct PlaidClient {
    client_id: String,
    secret: String,
    host: String,
    client: Client,
}

impl PlaidClient {
    pub fn new(client_id: String, secret: String, environment: &str) -> Self {
        let host = match environment {
            "production" => PRODUCTION_HOST,
            "development" => DEVELOPMENT_HOST,
            _ => SANDBOX_HOST,
        };
        Self {
            client_id,
            secret,
            host: host.to_string(),
            client: Client::new(),
        }
    }

    /// Builds a client from `PLAID_CLIENT_ID` / `PLAID_SECRET` /
    /// `PLAID_ENV`. Returns `None` when credentials are absent so callers
    /// can run without the aggregation feature.
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("PLAID_CLIENT_ID").ok()?;
        let secret = std::env::var("PLAID_SECRET").ok()?;
        if client_id.trim().is_empty() || secret.trim().is_empty() {
            return None;
        }
        let environment = std::env::var("PLAID_ENV").unwrap_or_else(|_| "sandbox".to_string());
        Some(Self::new(client_id, secret, &environment))
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        mut body: serde_json::Value,
    ) -> Result<T, BankError> {
        let url = format!("{}{}", self.host, path);
        debug!("POST {}", url);

        // Credentials ride in the request body, per the provider contract.
        body["client_id"] = json!(self.client_id);
        body["secret"] = json!(self.secret);

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(BankError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, text
            )));
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn create_link_token(&self, user_id: &str) -> Result<LinkToken, BankError> {
        #[derive(serde::Deserialize)]
        struct Response {
            link_token: String,
            expiration: String,
        }

        let body = json!({
            "client_name": CLIENT_NAME,
            "language": "en",
            "country_codes": ["US"],
            "products": ["transactions", "auth"],
            "user": { "client_user_id": user_id },
        });
        let response: Response = self.post("/link/token/create", body).await?;
        Ok(LinkToken {
            link_token: response.link_token,
            expiration: response.expiration,
        })
    }

    pub async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<TokenExchange, BankError> {
        let body = json!({ "public_token": public_token });
        self.post("/item/public_token/exchange", body).await
    }

    pub async fn get_accounts(
        &self,
        access_token: &str,
    ) -> Result<Vec<ProviderAccount>, BankError> {
        #[derive(serde::Deserialize)]
        struct Response {
            accounts: Vec<ProviderAccount>,
        }

        let body = json!({ "access_token": access_token });
        let response: Response = self.post("/accounts/get", body).await?;
        Ok(response.accounts)
    }

    pub async fn get_transactions(
        &self,
        access_token: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<ProviderTransaction>, BankError> {
        #[derive(serde::Deserialize)]
        struct Response {
            transactions: Vec<ProviderTransaction>,
        }

        let mut options = json!({ "count": TRANSACTIONS_PAGE_SIZE });
        if let Some(ids) = account_ids {
            options["account_ids"] = json!(ids);
        }
        let body = json!({
            "access_token": access_token,
            "start_date": start_date.format("%Y-%m-%d").to_string(),
            "end_date": end_date.format("%Y-%m-%d").to_string(),
            "options": options,
        });
        let response: Response = self.post("/transactions/get", body).await?;
        Ok(response.transactions)
    }
}
