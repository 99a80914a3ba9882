use serde::Serialize;

use super::Reported;

/// Parsed view of a chat-completion exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmView {
    pub basic_info: LlmBasicInfo,

    /// Present only when the request body names a model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_info: Option<ModelInfo>,

    /// Present only when the request body is a JSON object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_info: Option<RequestInfo>,

    /// Request messages in order; empty when the request has none
    pub conversation: Vec<ConversationMessage>,

    /// Absent (not empty) when neither streamed nor non-streamed output exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_content: Option<ResponseContent>,

    /// Present only for responses with at least one streamed fragment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming_info: Option<StreamingInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmBasicInfo {
    pub id: Reported<String>,
    pub timestamp: Reported<String>,
    pub method: Reported<String>,
    pub path: Reported<String>,
    pub status: Reported<u16>,
    pub duration_ms: Reported<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub provider: String,
    pub model_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestInfo {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u64>,
    pub stream: bool,
    pub tool_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationMessage {
    pub role: String,
    /// Plain text, or the canonical text form of structured content
    pub content: String,
    /// Length of `content` in characters
    pub content_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseContent {
    pub generated_text: String,
    pub usage: Usage,
}

/// Token accounting; counts default to zero, cost stays absent unless reported
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamingInfo {
    pub total_chunks: usize,
    pub total_content_length: usize,
}
