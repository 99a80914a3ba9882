use serde_json::{Map, Value};
use tracing::trace;
use wiretrace_types::{
    ErrorInfo, JsonRpcMessage, McpBasicInfo, McpExchange, McpView, MessageInfo, PreviewLimits,
    Reported, ToolInfo, canonical_text, id_text, truncate,
};

use super::schema::{ToolCallParams, ToolsListResult};

const TOOLS_CALL: &str = "tools/call";

/// Builds the parsed view of an MCP JSON-RPC exchange
#[derive(Debug, Clone, Default)]
pub struct McpNormalizer {
    limits: PreviewLimits,
}

impl McpNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: PreviewLimits) -> Self {
        Self { limits }
    }

    /// Normalize one exchange; every JSON-RPC member is optional, so this
    /// cannot fail
    pub fn normalize(&self, exchange: &McpExchange) -> McpView {
        trace!(session_id = ?exchange.session_id, "normalizing mcp exchange");

        let request = &exchange.request;
        let response = exchange.response.as_ref();

        McpView {
            basic_info: McpBasicInfo {
                session_id: exchange.session_id.clone().into(),
                timestamp: exchange.timestamp.clone().into(),
                direction: exchange.direction,
            },
            message_info: message_info(request, response),
            tool_info: self.tool_info(request, response),
            error_info: response.and_then(error_info),
        }
    }

    fn tool_info(&self, request: &JsonRpcMessage, response: Option<&JsonRpcMessage>) -> Option<ToolInfo> {
        self.invocation(request).or_else(|| response.and_then(listing))
    }

    fn invocation(&self, request: &JsonRpcMessage) -> Option<ToolInfo> {
        if request.method.as_deref().is_some_and(|m| m != TOOLS_CALL) {
            return None;
        }

        let params = ToolCallParams::from_params(request.params.as_ref()?);
        let tool_name = params.name?;
        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Map::new()));
        let arguments_summary = truncate(&canonical_text(&arguments), self.limits.arguments_cutoff);

        Some(ToolInfo::Invocation {
            tool_name,
            arguments,
            arguments_summary,
        })
    }
}

/// Normalize with the default preview limits
pub fn normalize_mcp_exchange(exchange: &McpExchange) -> McpView {
    McpNormalizer::default().normalize(exchange)
}

fn message_info(request: &JsonRpcMessage, response: Option<&JsonRpcMessage>) -> MessageInfo {
    let method = request
        .method
        .clone()
        .or_else(|| response.and_then(|r| r.method.clone()));
    let id = request
        .id
        .as_ref()
        .and_then(id_text)
        .or_else(|| response.and_then(|r| r.id.as_ref()).and_then(id_text));
    let jsonrpc = request
        .jsonrpc
        .clone()
        .or_else(|| response.and_then(|r| r.jsonrpc.clone()));

    MessageInfo {
        method: method.into(),
        id: id.into(),
        jsonrpc: jsonrpc.into(),
    }
}

fn listing(response: &JsonRpcMessage) -> Option<ToolInfo> {
    let available_tools = ToolsListResult::from_result(response.result.as_ref()?).tool_names()?;
    Some(ToolInfo::Listing {
        tool_count: available_tools.len(),
        available_tools,
    })
}

fn error_info(response: &JsonRpcMessage) -> Option<ErrorInfo> {
    let error = response.error.as_ref()?;
    Some(ErrorInfo {
        code: Reported::from(error.code),
        message: Reported::from(error.message.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiretrace_types::{JsonRpcError, McpDirection};

    fn call(params: Value) -> JsonRpcMessage {
        JsonRpcMessage {
            jsonrpc: Some("2.0".to_string()),
            id: Some(json!(3)),
            method: Some("tools/call".to_string()),
            params: Some(params),
            ..Default::default()
        }
    }

    #[test]
    fn test_tool_invocation() {
        let exchange = McpExchange {
            session_id: Some("s-1".to_string()),
            request: call(json!({"name": "search", "arguments": {"q": "x"}})),
            ..Default::default()
        };

        let view = normalize_mcp_exchange(&exchange);
        assert_eq!(view.message_info.method, Reported::Known("tools/call".to_string()));
        assert_eq!(view.message_info.id, Reported::Known("3".to_string()));
        assert_eq!(
            view.tool_info,
            Some(ToolInfo::Invocation {
                tool_name: "search".to_string(),
                arguments: json!({"q": "x"}),
                arguments_summary: r#"{"q":"x"}"#.to_string(),
            })
        );
        assert!(view.error_info.is_none());
    }

    #[test]
    fn test_missing_arguments_default_to_empty_object() {
        let exchange = McpExchange {
            request: call(json!({"name": "ping"})),
            ..Default::default()
        };
        match normalize_mcp_exchange(&exchange).tool_info {
            Some(ToolInfo::Invocation {
                arguments,
                arguments_summary,
                ..
            }) => {
                assert_eq!(arguments, json!({}));
                assert_eq!(arguments_summary, "{}");
            }
            other => panic!("expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_arguments_summary_is_truncated() {
        let long = "x".repeat(200);
        let exchange = McpExchange {
            request: call(json!({"name": "echo", "arguments": {"text": long}})),
            ..Default::default()
        };
        let normalizer = McpNormalizer::with_limits(PreviewLimits {
            arguments_cutoff: 10,
            ..Default::default()
        });
        match normalizer.normalize(&exchange).tool_info {
            Some(ToolInfo::Invocation {
                arguments_summary, ..
            }) => assert_eq!(arguments_summary, r#"{"text":"x..."#),
            other => panic!("expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_listing_dedupes_names() {
        let exchange = McpExchange {
            request: JsonRpcMessage {
                method: Some("tools/list".to_string()),
                ..Default::default()
            },
            response: Some(JsonRpcMessage {
                result: Some(json!({
                    "tools": [
                        {"name": "get_weather"},
                        {"name": "get_forecast"},
                        {"name": "get_weather"},
                        {"description": "nameless"},
                        "garbage"
                    ]
                })),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(
            normalize_mcp_exchange(&exchange).tool_info,
            Some(ToolInfo::Listing {
                available_tools: vec!["get_weather".to_string(), "get_forecast".to_string()],
                tool_count: 2,
            })
        );
    }

    #[test]
    fn test_other_method_with_name_param_is_not_invocation() {
        let exchange = McpExchange {
            request: JsonRpcMessage {
                method: Some("prompts/get".to_string()),
                params: Some(json!({"name": "summarize"})),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(normalize_mcp_exchange(&exchange).tool_info.is_none());
    }

    #[test]
    fn test_error_does_not_affect_tool_info() {
        let exchange = McpExchange {
            request: call(json!({"name": "search", "arguments": {}})),
            response: Some(JsonRpcMessage {
                error: Some(JsonRpcError {
                    code: Some(-32602),
                    message: Some("Invalid params".to_string()),
                    data: None,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let view = normalize_mcp_exchange(&exchange);
        assert_eq!(view.tool_info.as_ref().and_then(|t| t.tool_name()), Some("search"));
        let error = view.error_info.unwrap();
        assert_eq!(error.code, Reported::Known(-32602));
        assert_eq!(error.message, Reported::Known("Invalid params".to_string()));
    }

    #[test]
    fn test_error_without_fields_reports_unknown() {
        let exchange = McpExchange {
            response: Some(JsonRpcMessage {
                error: Some(JsonRpcError::default()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let error = normalize_mcp_exchange(&exchange).error_info.unwrap();
        assert!(error.code.is_unknown());
        assert!(error.message.is_unknown());
    }

    #[test]
    fn test_message_info_falls_back_to_response() {
        let exchange = McpExchange {
            direction: McpDirection::Response,
            response: Some(JsonRpcMessage {
                jsonrpc: Some("2.0".to_string()),
                id: Some(json!("req-9")),
                result: Some(json!({})),
                ..Default::default()
            }),
            ..Default::default()
        };

        let view = normalize_mcp_exchange(&exchange);
        assert!(view.message_info.method.is_unknown());
        assert_eq!(view.message_info.id, Reported::Known("req-9".to_string()));
        assert_eq!(view.message_info.jsonrpc, Reported::Known("2.0".to_string()));
        assert_eq!(view.basic_info.direction, McpDirection::Response);
        assert!(view.basic_info.session_id.is_unknown());
        assert!(view.tool_info.is_none());
    }
}
