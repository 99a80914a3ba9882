use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wiretrace_types::Usage;

use crate::lenient::{lenient, lenient_vec};

// Raw chat-completion payload shapes. Every field is lenient: a field of the
// wrong type reads as absent instead of failing the whole payload.

/// Request body of `POST /v1/chat/completions`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub messages: Vec<ChatMessage>,
    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_completion_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub stream: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub tools: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
    /// String, content-part array, or null
    #[serde(default)]
    pub content: Option<Value>,
}

/// Non-streamed response body
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatCompletion {
    /// Kept raw so a malformed first choice is not replaced by the next one
    #[serde(default, deserialize_with = "lenient_vec")]
    pub choices: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Option<UsageRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CompletionChoice {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<ChoiceMessage>,
    /// Legacy `/v1/completions` text
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<Value>,
}

/// One streamed `data:` payload
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CompletionChunk {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub choices: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Option<UsageRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChunkChoice {
    #[serde(default, deserialize_with = "lenient")]
    pub delta: Option<ChunkDelta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChunkDelta {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
}

impl CompletionChunk {
    /// `choices[0].delta.content`
    pub fn delta_content(&self) -> Option<String> {
        first_choice::<ChunkChoice>(&self.choices)?.delta?.content
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct UsageRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub completion_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cost: Option<f64>,
}

impl UsageRecord {
    pub fn into_usage(self) -> Usage {
        Usage {
            prompt_tokens: self.prompt_tokens.unwrap_or(0),
            completion_tokens: self.completion_tokens.unwrap_or(0),
            total_tokens: self.total_tokens.unwrap_or(0),
            cost: self.cost,
        }
    }
}

impl ChatRequest {
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    pub fn max_tokens(&self) -> Option<u64> {
        self.max_tokens.or(self.max_completion_tokens)
    }
}

impl ChatCompletion {
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    /// `choices[0]`, absent when missing or malformed
    pub fn first_choice(&self) -> Option<CompletionChoice> {
        first_choice(&self.choices)
    }
}

/// Decode only the first choice; later choices never stand in for it
fn first_choice<T: DeserializeOwned>(choices: &[Value]) -> Option<T> {
    serde_json::from_value(choices.first()?.clone()).ok()
}
