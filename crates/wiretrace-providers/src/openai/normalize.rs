use serde_json::Value;
use tracing::trace;
use wiretrace_types::{
    ConversationMessage, Error, LlmBasicInfo, LlmExchange, LlmResponse, LlmView, ModelInfo,
    Reported, RequestInfo, ResponseContent, Result, StreamingInfo, canonical_text, char_len,
};

use super::schema::{ChatCompletion, ChatMessage, ChatRequest, CompletionChoice};
use crate::models::PrefixModelClassifier;
use crate::sse::decode_stream;
use crate::traits::ModelClassifier;

/// Builds the parsed view of a chat-completion exchange
pub struct LlmNormalizer {
    classifier: Box<dyn ModelClassifier>,
}

impl Default for LlmNormalizer {
    fn default() -> Self {
        Self::new(PrefixModelClassifier)
    }
}

impl LlmNormalizer {
    pub fn new(classifier: impl ModelClassifier + 'static) -> Self {
        Self {
            classifier: Box::new(classifier),
        }
    }

    /// Normalize one exchange
    ///
    /// Fails only when the exchange has neither a request nor a response.
    pub fn normalize(&self, exchange: &LlmExchange) -> Result<LlmView> {
        if exchange.request.is_none() && exchange.response.is_none() {
            return Err(Error::Normalization(
                "exchange has neither a request nor a response".to_string(),
            ));
        }
        trace!(id = ?exchange.id, "normalizing llm exchange");

        let request_body = exchange.request.as_ref().and_then(|r| r.body.as_ref());
        let chat_request = request_body
            .filter(|body| body.is_object())
            .map(ChatRequest::from_body);

        let model_info = chat_request
            .as_ref()
            .and_then(|req| req.model.as_deref())
            .map(|model_name| self.model_info(model_name));

        let request_info = chat_request.as_ref().map(|req| RequestInfo {
            temperature: req.temperature,
            max_tokens: req.max_tokens(),
            stream: req.stream.unwrap_or(false),
            tool_count: req.tools.as_ref().map_or(0, Vec::len),
        });

        let conversation = chat_request
            .as_ref()
            .map(|req| req.messages.iter().map(conversation_message).collect())
            .unwrap_or_default();

        let (response_content, streaming_info) = match exchange.response.as_ref() {
            Some(response) => extract_response(response),
            None => (None, None),
        };

        Ok(LlmView {
            basic_info: basic_info(exchange),
            model_info,
            request_info,
            conversation,
            response_content,
            streaming_info,
        })
    }

    fn model_info(&self, model_name: &str) -> ModelInfo {
        let class = self.classifier.classify(model_name);
        ModelInfo {
            model_name: model_name.to_string(),
            provider: class.provider,
            model_type: class.model_type,
        }
    }
}

/// Normalize with the default model classifier
pub fn normalize_llm_exchange(exchange: &LlmExchange) -> Result<LlmView> {
    LlmNormalizer::default().normalize(exchange)
}

/// Generated text of a response: decoded stream when fragments exist,
/// otherwise the completion text of a non-streamed body
pub fn response_text(response: &LlmResponse) -> Option<String> {
    extract_response(response)
        .0
        .map(|content| content.generated_text)
}

fn basic_info(exchange: &LlmExchange) -> LlmBasicInfo {
    let request = exchange.request.as_ref();
    let response = exchange.response.as_ref();

    LlmBasicInfo {
        id: exchange.id.clone().into(),
        timestamp: exchange.timestamp.clone().into(),
        method: request.and_then(|r| r.method.clone()).into(),
        path: request.and_then(|r| r.path.clone()).into(),
        status: response.and_then(|r| r.status).into(),
        duration_ms: Reported::from(response.and_then(|r| r.duration_ms)),
    }
}

fn conversation_message(message: &ChatMessage) -> ConversationMessage {
    let content = message
        .content
        .as_ref()
        .map(canonical_text)
        .unwrap_or_default();

    ConversationMessage {
        role: message
            .role
            .clone()
            .unwrap_or_else(|| Reported::<String>::SENTINEL.to_string()),
        content_length: char_len(&content),
        content,
    }
}

fn extract_response(response: &LlmResponse) -> (Option<ResponseContent>, Option<StreamingInfo>) {
    if let Some(chunks) = response.chunks.as_deref().filter(|c| !c.is_empty()) {
        let decoded = decode_stream(chunks);
        let streaming_info = StreamingInfo {
            total_chunks: decoded.total_chunks,
            total_content_length: decoded.total_content_length,
        };
        let content = ResponseContent {
            generated_text: decoded.generated_text,
            usage: decoded.usage.unwrap_or_default(),
        };
        return (Some(content), Some(streaming_info));
    }

    let content = response
        .body
        .as_ref()
        .filter(|body| body.is_object())
        .map(ChatCompletion::from_body)
        .and_then(|completion| {
            let text = completion.first_choice().as_ref().and_then(choice_text)?;
            Some(ResponseContent {
                generated_text: text,
                usage: completion
                    .usage
                    .map(|usage| usage.into_usage())
                    .unwrap_or_default(),
            })
        });

    (content, None)
}

fn choice_text(choice: &CompletionChoice) -> Option<String> {
    if let Some(message) = &choice.message {
        return Some(
            message
                .content
                .as_ref()
                .map(canonical_text)
                .unwrap_or_default(),
        );
    }
    choice.text.clone()
}

/// Content of the last request message that has any, in canonical text form
pub fn last_message_content(body: &Value) -> Option<String> {
    ChatRequest::from_body(body)
        .messages
        .iter()
        .rev()
        .filter_map(|message| message.content.as_ref().map(canonical_text))
        .find(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiretrace_types::{LlmRequest, Usage};

    fn request(body: Value) -> Option<LlmRequest> {
        Some(LlmRequest {
            method: Some("POST".to_string()),
            path: Some("/v1/chat/completions".to_string()),
            body: Some(body),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_exchange_is_unusable() {
        let err = normalize_llm_exchange(&LlmExchange::default()).unwrap_err();
        assert_eq!(err.code(), "normalization_failed");
    }

    #[test]
    fn test_request_only_exchange() {
        let exchange = LlmExchange {
            id: Some("req-1".to_string()),
            request: request(json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.2,
                "tools": [{"type": "function"}, {"type": "function"}]
            })),
            ..Default::default()
        };

        let view = normalize_llm_exchange(&exchange).unwrap();
        assert_eq!(view.basic_info.id, Reported::Known("req-1".to_string()));
        assert!(view.basic_info.timestamp.is_unknown());
        assert!(view.basic_info.status.is_unknown());
        assert!(view.basic_info.duration_ms.is_unknown());
        assert!(view.response_content.is_none());
        assert!(view.streaming_info.is_none());

        let model = view.model_info.unwrap();
        assert_eq!(model.model_name, "gpt-4o");
        assert_eq!(model.provider, "openai");

        let info = view.request_info.unwrap();
        assert_eq!(info.temperature, Some(0.2));
        assert_eq!(info.max_tokens, None);
        assert!(!info.stream);
        assert_eq!(info.tool_count, 2);
    }

    #[test]
    fn test_model_info_absent_without_model() {
        let exchange = LlmExchange {
            request: request(json!({"messages": []})),
            ..Default::default()
        };
        let view = normalize_llm_exchange(&exchange).unwrap();
        assert!(view.model_info.is_none());
        assert!(view.request_info.is_some());
    }

    #[test]
    fn test_structured_content_is_canonicalized() {
        let exchange = LlmExchange {
            request: request(json!({
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": [{"text": "hi", "type": "text"}]},
                    {"content": null}
                ]
            })),
            ..Default::default()
        };

        let view = normalize_llm_exchange(&exchange).unwrap();
        assert_eq!(view.conversation.len(), 3);
        assert_eq!(view.conversation[0].content, "be brief");
        assert_eq!(view.conversation[0].content_length, 8);
        assert_eq!(view.conversation[1].content, r#"[{"text":"hi","type":"text"}]"#);
        assert_eq!(
            view.conversation[1].content_length,
            view.conversation[1].content.chars().count()
        );
        assert_eq!(view.conversation[2].role, "unknown");
        assert_eq!(view.conversation[2].content, "");
    }

    #[test]
    fn test_non_streamed_response() {
        let exchange = LlmExchange {
            request: request(json!({"model": "deepseek-chat", "messages": []})),
            response: Some(LlmResponse {
                status: Some(200),
                duration_ms: Some(812.5),
                body: Some(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Sunny."}}],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
                })),
                ..Default::default()
            }),
            ..Default::default()
        };

        let view = normalize_llm_exchange(&exchange).unwrap();
        assert_eq!(view.basic_info.status, Reported::Known(200));
        assert_eq!(view.basic_info.duration_ms, Reported::Known(812.5));
        let content = view.response_content.unwrap();
        assert_eq!(content.generated_text, "Sunny.");
        assert_eq!(
            content.usage,
            Usage {
                prompt_tokens: 12,
                completion_tokens: 3,
                total_tokens: 15,
                cost: None
            }
        );
        assert!(view.streaming_info.is_none());
    }

    #[test]
    fn test_usage_defaults_and_cost() {
        let without_usage = LlmResponse {
            body: Some(json!({"choices": [{"message": {"content": "x"}}]})),
            ..Default::default()
        };
        let (content, _) = extract_response(&without_usage);
        assert_eq!(content.unwrap().usage, Usage::default());

        let with_zero_cost = LlmResponse {
            body: Some(json!({
                "choices": [{"message": {"content": "x"}}],
                "usage": {"total_tokens": 4, "cost": 0.0}
            })),
            ..Default::default()
        };
        let (content, _) = extract_response(&with_zero_cost);
        let usage = content.unwrap().usage;
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.total_tokens, 4);
        assert_eq!(usage.cost, Some(0.0));
    }

    #[test]
    fn test_error_body_has_no_response_content() {
        let exchange = LlmExchange {
            request: request(json!({"model": "gpt-4o"})),
            response: Some(LlmResponse {
                status: Some(500),
                body: Some(json!({"error": "upstream timeout"})),
                ..Default::default()
            }),
            ..Default::default()
        };
        let view = normalize_llm_exchange(&exchange).unwrap();
        assert!(view.response_content.is_none());
        assert_eq!(view.basic_info.status, Reported::Known(500));
    }

    #[test]
    fn test_tool_call_reply_has_empty_text() {
        let response = LlmResponse {
            body: Some(json!({
                "choices": [{"message": {"content": null, "tool_calls": [{"id": "c1"}]}}]
            })),
            ..Default::default()
        };
        assert_eq!(response_text(&response), Some(String::new()));
    }

    #[test]
    fn test_legacy_completion_text() {
        let response = LlmResponse {
            body: Some(json!({"choices": [{"text": "done"}]})),
            ..Default::default()
        };
        assert_eq!(response_text(&response), Some("done".to_string()));
    }

    #[test]
    fn test_malformed_first_choice_is_not_replaced() {
        let response = LlmResponse {
            body: Some(json!({"choices": ["oops", {"message": {"content": "second"}}]})),
            ..Default::default()
        };
        assert_eq!(response_text(&response), None);
    }

    #[test]
    fn test_empty_chunks_fall_back_to_body() {
        let response = LlmResponse {
            chunks: Some(Vec::new()),
            body: Some(json!({"choices": [{"message": {"content": "body"}}]})),
            ..Default::default()
        };
        let (content, streaming) = extract_response(&response);
        assert_eq!(content.unwrap().generated_text, "body");
        assert!(streaming.is_none());
    }

    #[test]
    fn test_non_json_request_body() {
        let exchange = LlmExchange {
            request: request(Value::String("not json".to_string())),
            ..Default::default()
        };
        let view = normalize_llm_exchange(&exchange).unwrap();
        assert!(view.request_info.is_none());
        assert!(view.conversation.is_empty());
    }

    #[test]
    fn test_last_message_content_skips_empty() {
        let body = json!({
            "messages": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": ""},
                {"role": "tool"}
            ]
        });
        assert_eq!(last_message_content(&body), Some("first".to_string()));
        assert_eq!(last_message_content(&json!({})), None);
    }
}
