use thiserror::Error;

/// Errors raised by the assistant layer
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant is not configured. Set OPENAI_API_KEY to enable financial advice.")]
    NotConfigured,

    #[error("Completion request failed: {0}")]
    CompletionFailed(String),

    #[error("Completion response was malformed: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::CompletionFailed(err.to_string())
    }
}
