use anyhow::Result;
use wiretrace_types::{LlmView, McpView, NormalizeOutcome, ParsedView, ToolInfo};

use crate::types::OutputFormat;

pub(super) fn print_outcome(outcome: &NormalizeOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => super::print_json(outcome),
        OutputFormat::Plain => {
            println!("{}", render_outcome(outcome));
            Ok(())
        }
    }
}

fn render_outcome(outcome: &NormalizeOutcome) -> String {
    match outcome {
        NormalizeOutcome::View(ParsedView::Llm(view)) => render_llm(view),
        NormalizeOutcome::View(ParsedView::Mcp(view)) => render_mcp(view),
        NormalizeOutcome::Error { error, code } => format!("Error [{code}]: {error}"),
    }
}

fn render_llm(view: &LlmView) -> String {
    let basic = &view.basic_info;
    let mut out = vec![
        format!("ID:        {}", basic.id),
        format!("Time:      {}", basic.timestamp),
        format!("Request:   {} {}", basic.method, basic.path),
        format!("Status:    {}", basic.status),
        format!("Duration:  {} ms", basic.duration_ms),
    ];

    if let Some(model) = &view.model_info {
        out.push(format!(
            "Model:     {} ({}, {})",
            model.model_name, model.provider, model.model_type
        ));
    }

    if let Some(info) = &view.request_info {
        let temperature = info
            .temperature
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        let max_tokens = info
            .max_tokens
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        out.push(format!(
            "Params:    temperature={} max_tokens={} stream={} tools={}",
            temperature, max_tokens, info.stream, info.tool_count
        ));
    }

    if !view.conversation.is_empty() {
        out.push(String::new());
        out.push("Conversation:".to_string());
        for message in &view.conversation {
            out.push(format!(
                "  [{}] ({} chars) {}",
                message.role, message.content_length, message.content
            ));
        }
    }

    if let Some(content) = &view.response_content {
        let usage = &content.usage;
        out.push(String::new());
        out.push("Response:".to_string());
        out.push(format!("  {}", content.generated_text));
        let mut tokens = format!(
            "Tokens:    prompt={} completion={} total={}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
        if let Some(cost) = usage.cost {
            tokens.push_str(&format!(" cost={}", cost));
        }
        out.push(tokens);
    }

    if let Some(streaming) = &view.streaming_info {
        out.push(format!(
            "Streaming: {} chunks, {} chars",
            streaming.total_chunks, streaming.total_content_length
        ));
    }

    out.join("\n")
}

fn render_mcp(view: &McpView) -> String {
    let basic = &view.basic_info;
    let message = &view.message_info;
    let mut out = vec![
        format!("Session:   {}", basic.session_id),
        format!("Time:      {}", basic.timestamp),
        format!("Direction: {}", basic.direction),
        format!("Method:    {}", message.method),
        format!("ID:        {}", message.id),
        format!("JSON-RPC:  {}", message.jsonrpc),
    ];

    match &view.tool_info {
        Some(ToolInfo::Invocation {
            tool_name,
            arguments_summary,
            ..
        }) => {
            out.push(format!("Tool:      {}", tool_name));
            out.push(format!("Arguments: {}", arguments_summary));
        }
        Some(ToolInfo::Listing {
            available_tools,
            tool_count,
        }) => {
            out.push(format!(
                "Tools:     {} available: {}",
                tool_count,
                available_tools.join(", ")
            ));
        }
        None => {}
    }

    if let Some(error) = &view.error_info {
        out.push(format!("Error:     {} {}", error.code, error.message));
    }

    out.join("\n")
}
