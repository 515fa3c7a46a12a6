pub mod assistant_errors;
pub mod assistant_model;
pub mod assistant_service;
pub mod completion_client;
pub mod intent;

pub use assistant_errors::AssistantError;
pub use assistant_model::{AssistantReply, Insight};
pub use assistant_service::{AssistantService, AssistantServiceTrait};
pub use completion_client::CompletionClient;
pub use intent::{detect_intent, extract_search_terms, extract_time_period, Intent, TimePeriod};
