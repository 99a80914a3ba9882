//! Sample exchanges and recorder files.
//!
//! Raw samples are plain `serde_json::Value`s in the on-disk recorder shapes;
//! the `*_exchange` helpers return typed `RawExchange`s for engine tests.

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use wiretrace_types::{JsonRpcError, JsonRpcMessage, LlmExchange, McpExchange, RawExchange};

pub const SESSION_ID: &str = "6f1c2a9e-session";

/// SSE fragment carrying one delta
pub fn sse_delta(content: &str) -> String {
    format!(
        "data: {}",
        json!({"choices": [{"index": 0, "delta": {"content": content}}]})
    )
}

/// Streamed fragments for `parts`, terminated by `data: [DONE]`
pub fn sse_fragments(parts: &[&str]) -> Vec<String> {
    let mut fragments: Vec<String> = parts.iter().map(|p| sse_delta(p)).collect();
    fragments.push("data: [DONE]".to_string());
    fragments
}

/// Chat-completion request body
pub fn chat_request_body(model: &str, user_message: &str, stream: bool) -> Value {
    json!({
        "model": model,
        "messages": [
            {"role": "system", "content": "You are a weather assistant."},
            {"role": "user", "content": user_message}
        ],
        "temperature": 0.7,
        "max_tokens": 256,
        "stream": stream
    })
}

/// Flat LLM recorder record with a non-streamed response
pub fn llm_record(id: &str, timestamp: &str, model: &str, reply: &str, total_tokens: u64) -> Value {
    json!({
        "id": id,
        "timestamp": timestamp,
        "method": "POST",
        "path": "/v1/chat/completions",
        "headers": {"content-type": "application/json"},
        "body": chat_request_body(model, "What's the weather in Paris?", false),
        "response_status": 200,
        "response_headers": {"content-type": "application/json"},
        "response_body": {
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": reply}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": total_tokens.saturating_sub(3), "completion_tokens": 3u64.min(total_tokens), "total_tokens": total_tokens}
        },
        "response_chunks": [],
        "duration_ms": 420.0
    })
}

/// Flat LLM recorder record with a streamed response
pub fn streamed_llm_record(id: &str, timestamp: &str, model: &str, parts: &[&str]) -> Value {
    json!({
        "id": id,
        "timestamp": timestamp,
        "method": "POST",
        "path": "/v1/chat/completions",
        "headers": {},
        "body": chat_request_body(model, "Stream the forecast", true),
        "response_status": 200,
        "response_headers": {"content-type": "text/event-stream"},
        "response_body": null,
        "response_chunks": sse_fragments(parts),
        "duration_ms": 950.0
    })
}

/// Session log line in the MCP server's JSONL shape
pub fn session_line(timestamp: &str, direction: &str, message: Value) -> Value {
    json!({
        "session_id": SESSION_ID,
        "timestamp": timestamp,
        "direction": direction,
        "message": message
    })
}

/// `tools/list` round trip followed by a `tools/call` round trip
pub fn weather_session() -> Vec<Value> {
    vec![
        session_line(
            "2024-05-01T10:00:00",
            "request",
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list", "params": {}}),
        ),
        session_line(
            "2024-05-01T10:00:00.100",
            "response",
            json!({"jsonrpc": "2.0", "id": 1, "result": {"tools": [
                {"name": "get_weather", "description": "Current weather"},
                {"name": "get_forecast", "description": "Forecast"}
            ]}}),
        ),
        session_line(
            "2024-05-01T10:00:05",
            "request",
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {
                "name": "get_weather", "arguments": {"city": "Paris"}
            }}),
        ),
        session_line(
            "2024-05-01T10:00:05.300",
            "response",
            json!({"jsonrpc": "2.0", "id": 2, "result": {"content": [{"type": "text", "text": "Sunny, 21C"}]}}),
        ),
    ]
}

/// Write a pretty-printed LLM record as `{dir}/{id}.json`
pub fn write_llm_record(dir: &Path, record: &Value) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let id = record["id"].as_str().unwrap_or("record");
    let path = dir.join(format!("{id}.json"));
    fs::write(&path, serde_json::to_string_pretty(record)?)?;
    Ok(path)
}

/// Write session log lines as `{dir}/{session}.jsonl`
pub fn write_session_log(dir: &Path, session: &str, lines: &[Value]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{session}.jsonl"));
    let mut content = String::new();
    for line in lines {
        content.push_str(&serde_json::to_string(line)?);
        content.push('\n');
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// Typed LLM exchange with a streamed response built from `parts`
pub fn streamed_exchange(parts: &[&str]) -> RawExchange {
    let exchange: LlmExchange = serde_json::from_value(json!({
        "id": "stream-1",
        "timestamp": "2024-05-01T09:00:00",
        "request": {
            "method": "POST",
            "path": "/v1/chat/completions",
            "body": chat_request_body("gpt-4o", "Stream the forecast", true)
        },
        "response": {"status": 200, "chunks": sse_fragments(parts), "duration_ms": 950.0}
    }))
    .expect("valid sample exchange");
    exchange.into()
}

/// Typed LLM exchange with a non-streamed response carrying `reply`
pub fn completion_exchange(reply: &str) -> RawExchange {
    let exchange: LlmExchange = serde_json::from_value(json!({
        "id": "plain-1",
        "timestamp": "2024-05-01T09:00:00",
        "request": {
            "method": "POST",
            "path": "/v1/chat/completions",
            "body": chat_request_body("gpt-4o", "Stream the forecast", false)
        },
        "response": {
            "status": 200,
            "body": {"choices": [{"message": {"role": "assistant", "content": reply}}]},
            "duration_ms": 420.0
        }
    }))
    .expect("valid sample exchange");
    exchange.into()
}

/// Typed MCP `tools/call` exchange, optionally answered with a JSON-RPC error
pub fn tool_call_exchange(tool: &str, arguments: Value, error: Option<(i64, &str)>) -> RawExchange {
    let request = JsonRpcMessage {
        jsonrpc: Some("2.0".to_string()),
        id: Some(json!(7)),
        method: Some("tools/call".to_string()),
        params: Some(json!({"name": tool, "arguments": arguments})),
        ..Default::default()
    };
    let response = error.map(|(code, message)| JsonRpcMessage {
        jsonrpc: Some("2.0".to_string()),
        id: Some(json!(7)),
        error: Some(JsonRpcError {
            code: Some(code),
            message: Some(message.to_string()),
            data: None,
        }),
        ..Default::default()
    });

    McpExchange {
        id: Some(format!("{SESSION_ID}_1")),
        session_id: Some(SESSION_ID.to_string()),
        timestamp: Some("2024-05-01T10:00:05".to_string()),
        request,
        response,
        ..Default::default()
    }
    .into()
}
