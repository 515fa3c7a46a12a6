use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::assistant::assistant_errors::AssistantError;

static COMPLETIONS_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.7;

/// Minimal client for an OpenAI-compatible chat completions API.
pub struct CompletionClient {
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl CompletionClient {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client: Client::new(),
        }
    }

    /// Builds a client from `OPENAI_API_KEY` (and optional `OPENAI_MODEL`).
    /// Returns `None` when no key is configured.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self::new(api_key, std::env::var("OPENAI_MODEL").ok()))
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String, AssistantError> {
        debug!("POST {} (model {})", COMPLETIONS_ENDPOINT, self.model);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let resp = self
            .client
            .post(COMPLETIONS_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(AssistantError::CompletionFailed(format!(
                "HTTP {}: {}",
                status, text
            )));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| AssistantError::InvalidResponse("No completion choices".to_string()))
    }
}
