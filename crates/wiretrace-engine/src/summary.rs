//! List-display projections computed straight from raw exchanges.
//!
//! Nothing here goes through the normalizers: a preview must be producible
//! for any record, however incomplete.

use wiretrace_providers::{last_message_content, response_text};
use wiretrace_types::{
    LlmExchange, McpExchange, PreviewLimits, RawExchange, Reported, canonical_text, truncate,
};

const TOOLS_CALL: &str = "tools/call";

/// Short multi-line summary of an exchange, lines joined by `\n`
///
/// Never fails; an exchange with nothing to show yields an empty string.
pub fn preview(raw: &RawExchange, limits: &PreviewLimits) -> String {
    let lines = match raw {
        RawExchange::Llm(exchange) => llm_preview(exchange, limits),
        RawExchange::Mcp(exchange) => mcp_preview(exchange, limits),
    };
    lines.join("\n")
}

/// One-line title of an exchange
pub fn headline(raw: &RawExchange) -> String {
    match raw {
        RawExchange::Llm(exchange) => llm_headline(exchange),
        RawExchange::Mcp(exchange) => mcp_headline(exchange),
    }
}

fn llm_preview(exchange: &LlmExchange, limits: &PreviewLimits) -> Vec<String> {
    let mut lines = Vec::new();

    let request_body = exchange.request.as_ref().and_then(|r| r.body.as_ref());
    if let Some(content) = request_body.and_then(last_message_content) {
        lines.push(truncate(&content, limits.message_cutoff));
    }

    if let Some(text) = exchange.response.as_ref().and_then(response_text)
        && !text.is_empty()
    {
        lines.push(truncate(&text, limits.message_cutoff));
    }

    if let Some(meta) = llm_meta(exchange) {
        lines.push(meta);
    }

    lines
}

/// `status 200 | 812ms`; either part is left out when not recorded
fn llm_meta(exchange: &LlmExchange) -> Option<String> {
    let response = exchange.response.as_ref()?;
    let mut parts = Vec::new();

    if let Some(status) = response.status {
        parts.push(format!("status {status}"));
    }
    if let Some(duration) = response.duration_ms.filter(|ms| *ms > 0.0) {
        parts.push(format!("{duration:.0}ms"));
    }

    (!parts.is_empty()).then(|| parts.join(" | "))
}

fn mcp_preview(exchange: &McpExchange, limits: &PreviewLimits) -> Vec<String> {
    let mut lines = Vec::new();
    let request = &exchange.request;

    if request.method.is_some() || request.params.is_some() {
        let method = Reported::from(request.method.as_deref());
        let mut line = format!("method: {method}");
        if let Some(params) = &request.params {
            let params = truncate(&canonical_text(params), limits.params_cutoff);
            line.push_str(&format!(" | params: {params}"));
        }
        lines.push(line);
    }

    if let Some(error) = exchange.response.as_ref().and_then(|r| r.error.as_ref()) {
        let code = Reported::from(error.code);
        let message = Reported::from(error.message.as_deref());
        lines.push(format!("error {code}: {message}"));
    }

    lines
}

fn llm_headline(exchange: &LlmExchange) -> String {
    let request = exchange.request.as_ref();
    let method = Reported::from(request.and_then(|r| r.method.as_deref()));
    let path = Reported::from(request.and_then(|r| r.path.as_deref()));

    let mut headline = format!("{method} {path}");
    if let Some(model) = exchange.model_name() {
        headline.push_str(&format!(" (model: {model})"));
    }
    headline
}

fn mcp_headline(exchange: &McpExchange) -> String {
    match exchange.request.method.as_deref() {
        Some(TOOLS_CALL) => {
            let tool = exchange.request.tool_name().unwrap_or_default();
            format!("MCP: Call {tool}")
        }
        method => format!("MCP: {}", Reported::from(method)),
    }
}
