use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;
use wiretrace_types::{LlmExchange, LlmRequest, LlmResponse, Result};

use crate::discovery::recorder_files;
use crate::lenient::lenient;

/// One recorder file as written by the LLM proxy (flat request/response shape)
#[derive(Debug, Clone, Default, Deserialize)]
struct LlmRecord {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    method: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    body: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    response_status: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    response_headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    response_body: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    response_chunks: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    duration_ms: Option<f64>,
}

impl From<LlmRecord> for LlmExchange {
    fn from(record: LlmRecord) -> Self {
        let chunks = record.response_chunks.filter(|c| !c.is_empty());
        let has_response = record.response_status.is_some()
            || record.response_headers.is_some()
            || record.response_body.is_some()
            || chunks.is_some()
            || record.duration_ms.is_some();

        let response = has_response.then(|| LlmResponse {
            status: record.response_status,
            headers: record.response_headers,
            body: record.response_body,
            chunks,
            duration_ms: record.duration_ms,
        });

        LlmExchange {
            id: record.id,
            timestamp: record.timestamp,
            request: Some(LlmRequest {
                method: record.method,
                path: record.path,
                headers: record.headers.unwrap_or_default(),
                body: record.body,
            }),
            response,
        }
    }
}

/// Parse one LLM recorder file into an exchange
pub fn parse_llm_record(content: &str) -> Result<LlmExchange> {
    let record: LlmRecord = serde_json::from_str(content)?;
    Ok(record.into())
}

/// Read every `*.json` recorder file in `dir`, newest file name first
///
/// Unreadable or invalid files are logged and skipped.
pub fn load_llm_dir(dir: &Path) -> Result<Vec<LlmExchange>> {
    let mut exchanges = Vec::new();

    for path in recorder_files(dir, "json") {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read llm record");
                continue;
            }
        };

        match parse_llm_record(&content) {
            Ok(exchange) => exchanges.push(exchange),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping invalid llm record");
            }
        }
    }

    Ok(exchanges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_only_record() {
        let content = json!({
            "id": "abc",
            "timestamp": "2024-05-01T10:00:00",
            "method": "POST",
            "path": "/v1/chat/completions",
            "headers": {"content-type": "application/json"},
            "body": {"model": "gpt-4o"},
            "response_chunks": []
        })
        .to_string();

        let exchange = parse_llm_record(&content).unwrap();
        assert_eq!(exchange.id.as_deref(), Some("abc"));
        assert!(exchange.response.is_none());
        let request = exchange.request.unwrap();
        assert_eq!(request.method.as_deref(), Some("POST"));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_streamed_record() {
        let content = json!({
            "id": "s1",
            "method": "POST",
            "response_status": 200,
            "response_body": null,
            "response_chunks": ["data: [DONE]"],
            "duration_ms": 12.5
        })
        .to_string();

        let exchange = parse_llm_record(&content).unwrap();
        let response = exchange.response.unwrap();
        assert_eq!(response.status, Some(200));
        assert_eq!(response.body, None);
        assert_eq!(response.chunks.unwrap().len(), 1);
        assert_eq!(response.duration_ms, Some(12.5));
    }

    #[test]
    fn test_invalid_json_record_is_error() {
        let err = parse_llm_record("not json").unwrap_err();
        assert_eq!(err.code(), "invalid_json");
    }

    #[test]
    fn test_mistyped_field_reads_as_absent() {
        let exchange = parse_llm_record(r#"{"id": 7, "response_status": "ok"}"#).unwrap();
        assert_eq!(exchange.id, None);
        assert!(exchange.response.is_none());
    }
}
