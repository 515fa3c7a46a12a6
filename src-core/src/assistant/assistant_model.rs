use serde::{Deserialize, Serialize};

/// Structured reply produced by the assistant for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "serde_json::Value::is_null", default)]
    pub data: serde_json::Value,
}

impl AssistantReply {
    pub fn new(kind: &str, message: String, data: serde_json::Value) -> Self {
        AssistantReply {
            kind: kind.to_string(),
            message,
            data,
        }
    }
}

/// One generated insight for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub data: AssistantReply,
}
