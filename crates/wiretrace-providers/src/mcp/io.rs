use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};
use wiretrace_types::{JsonRpcMessage, McpDirection, McpExchange, Result};

use crate::discovery::recorder_files;
use crate::lenient::lenient;

/// One line of an MCP session log
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionLogEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    /// Unrecognized directions read as absent and are treated as requests
    #[serde(default, deserialize_with = "lenient")]
    pub direction: Option<McpDirection>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl SessionLogEntry {
    fn direction(&self) -> McpDirection {
        self.direction.unwrap_or_default()
    }

    fn jsonrpc_message(&self) -> JsonRpcMessage {
        let Some(message) = &self.message else {
            return JsonRpcMessage::default();
        };
        serde_json::from_value(message.clone()).unwrap_or_else(|err| {
            debug!(error = %err, "session log message is not a JSON-RPC object");
            JsonRpcMessage::default()
        })
    }
}

/// Pair session log lines into exchanges
///
/// A request line consumes the immediately following response or error line.
/// Response lines without a preceding request become standalone exchanges.
/// Exchange ids are `{session_id}_{index}` where index is the position of the
/// last line consumed.
pub fn pair_session_entries(entries: &[SessionLogEntry], fallback_session: &str) -> Vec<McpExchange> {
    let mut exchanges = Vec::new();
    let mut i = 0;

    while i < entries.len() {
        let entry = &entries[i];
        let session_id = entry
            .session_id
            .clone()
            .unwrap_or_else(|| fallback_session.to_string());

        let exchange = match entry.direction() {
            McpDirection::Request => {
                let reply = entries
                    .get(i + 1)
                    .filter(|next| next.direction() != McpDirection::Request);
                if reply.is_some() {
                    i += 1;
                }
                McpExchange {
                    id: Some(format!("{session_id}_{i}")),
                    timestamp: entry.timestamp.clone(),
                    direction: McpDirection::Request,
                    request: entry.jsonrpc_message(),
                    response: reply.map(SessionLogEntry::jsonrpc_message),
                    session_id: Some(session_id),
                }
            }
            direction => McpExchange {
                id: Some(format!("{session_id}_{i}")),
                timestamp: entry.timestamp.clone(),
                direction,
                request: JsonRpcMessage::default(),
                response: Some(entry.jsonrpc_message()),
                session_id: Some(session_id),
            },
        };

        exchanges.push(exchange);
        i += 1;
    }

    exchanges
}

/// Parse a JSONL session log; malformed lines are skipped
pub fn parse_session_log(content: &str, fallback_session: &str) -> Vec<McpExchange> {
    let mut entries = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<SessionLogEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(err) => debug!(line = line_no + 1, error = %err, "skipping malformed session log line"),
        }
    }

    pair_session_entries(&entries, fallback_session)
}

/// Read every `*.jsonl` session log in `dir`, newest file name first
pub fn load_mcp_dir(dir: &Path) -> Result<Vec<McpExchange>> {
    let mut exchanges = Vec::new();

    for path in recorder_files(dir, "jsonl") {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read mcp session log");
                continue;
            }
        };

        let fallback_session = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        exchanges.extend(parse_session_log(&content, &fallback_session));
    }

    Ok(exchanges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(direction: &str, message: Value) -> String {
        json!({
            "session_id": "sess",
            "timestamp": "2024-05-01T10:00:00",
            "direction": direction,
            "message": message
        })
        .to_string()
    }

    #[test]
    fn test_request_response_request() {
        let content = [
            line("request", json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})),
            line("response", json!({"jsonrpc": "2.0", "id": 1, "result": {"tools": []}})),
            line("request", json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})),
        ]
        .join("\n");

        let exchanges = parse_session_log(&content, "fallback");
        assert_eq!(exchanges.len(), 2);
        assert_eq!(exchanges[0].id.as_deref(), Some("sess_1"));
        assert!(exchanges[0].response.is_some());
        assert_eq!(exchanges[1].id.as_deref(), Some("sess_2"));
        assert!(exchanges[1].response.is_none());
        assert_eq!(exchanges[1].request.method.as_deref(), Some("ping"));
    }

    #[test]
    fn test_error_line_pairs_with_request() {
        let content = [
            line("request", json!({"id": 1, "method": "tools/call"})),
            line("error", json!({"id": 1, "error": {"code": -32000, "message": "boom"}})),
        ]
        .join("\n");

        let exchanges = parse_session_log(&content, "fallback");
        assert_eq!(exchanges.len(), 1);
        let error = exchanges[0].response.as_ref().and_then(|r| r.error.as_ref());
        assert_eq!(error.and_then(|e| e.code), Some(-32000));
    }

    #[test]
    fn test_unpaired_response_is_kept() {
        let content = [
            line("response", json!({"id": 0, "result": {}})),
            "{broken".to_string(),
            String::new(),
            line("request", json!({"id": 1, "method": "initialize"})),
        ]
        .join("\n");

        let exchanges = parse_session_log(&content, "fallback");
        assert_eq!(exchanges.len(), 2);
        assert_eq!(exchanges[0].direction, McpDirection::Response);
        assert_eq!(exchanges[0].id.as_deref(), Some("sess_0"));
        assert_eq!(exchanges[1].direction, McpDirection::Request);
        assert_eq!(exchanges[1].id.as_deref(), Some("sess_1"));
    }

    #[test]
    fn test_fallback_session_id() {
        let content = json!({"direction": "request", "message": {"method": "ping"}}).to_string();
        let exchanges = parse_session_log(&content, "from-file");
        assert_eq!(exchanges[0].session_id.as_deref(), Some("from-file"));
        assert_eq!(exchanges[0].id.as_deref(), Some("from-file_0"));
    }
}
