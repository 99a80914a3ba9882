use serde::Serialize;
use serde_json::Value;

use super::Reported;
use crate::McpDirection;

/// Parsed view of one MCP JSON-RPC exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpView {
    pub basic_info: McpBasicInfo,
    pub message_info: MessageInfo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_info: Option<ToolInfo>,

    /// Present only when the response carries a JSON-RPC error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_info: Option<ErrorInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpBasicInfo {
    pub session_id: Reported<String>,
    pub timestamp: Reported<String>,
    pub direction: McpDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageInfo {
    pub method: Reported<String>,
    pub id: Reported<String>,
    pub jsonrpc: Reported<String>,
}

/// Tool details; a single exchange is either a call or a listing, never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolInfo {
    Invocation {
        tool_name: String,
        arguments: Value,
        arguments_summary: String,
    },
    Listing {
        available_tools: Vec<String>,
        tool_count: usize,
    },
}

impl ToolInfo {
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            ToolInfo::Invocation { tool_name, .. } => Some(tool_name),
            ToolInfo::Listing { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub code: Reported<i64>,
    pub message: Reported<String>,
}
