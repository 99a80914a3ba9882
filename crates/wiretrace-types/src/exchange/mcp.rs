use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One JSON-RPC message (or request/response pair) captured on an MCP session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpExchange {
    /// Listing identifier assigned by the session reader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub direction: McpDirection,
    #[serde(default)]
    pub request: JsonRpcMessage,
    #[serde(default)]
    pub response: Option<JsonRpcMessage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McpDirection {
    #[default]
    Request,
    Response,
    /// Error reply logged by the server outside the normal response path
    Error,
}

impl McpDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            McpDirection::Request => "request",
            McpDirection::Response => "response",
            McpDirection::Error => "error",
        }
    }
}

impl fmt::Display for McpDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON-RPC 2.0 message; every member is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcMessage {
    /// `params.name` of a `tools/call` style request
    pub fn tool_name(&self) -> Option<&str> {
        self.param_str("name")
    }

    /// String member of `params`
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
    }
}
