use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Captured chat-completion exchange
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmExchange {
    #[serde(default)]
    pub id: Option<String>,
    /// Recorder timestamp (ISO-8601, with or without offset)
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub request: Option<LlmRequest>,
    /// Absent when the request was logged before any response existed
    #[serde(default)]
    pub response: Option<LlmResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Decoded JSON body, or a string when the body was not JSON
    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub body: Option<Value>,
    /// Raw streamed fragments in arrival order
    #[serde(default)]
    pub chunks: Option<Vec<String>>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
}

impl LlmExchange {
    /// JSON object body of the request, if any
    pub fn request_body(&self) -> Option<&serde_json::Map<String, Value>> {
        self.request
            .as_ref()
            .and_then(|r| r.body.as_ref())
            .and_then(Value::as_object)
    }

    /// Model name declared by the request body
    pub fn model_name(&self) -> Option<&str> {
        self.request_body()
            .and_then(|body| body.get("model"))
            .and_then(Value::as_str)
    }
}
