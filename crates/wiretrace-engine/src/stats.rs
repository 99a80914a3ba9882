use serde::Serialize;
use std::collections::BTreeMap;
use wiretrace_types::{JsonRpcMessage, LlmView, McpView, ParsedView, RawExchange, ToolInfo};

use crate::dispatch::Dispatcher;

const RESOURCES_READ: &str = "resources/read";
const PROMPTS_GET: &str = "prompts/get";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrafficStats {
    pub llm: LlmStats,
    pub mcp: McpStats,
    /// Exchanges that could not be normalized
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LlmStats {
    pub total_exchanges: usize,
    pub total_tokens: u64,
    pub models: BTreeMap<String, usize>,
    pub status_codes: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<ResponseTimes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponseTimes {
    pub min_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct McpStats {
    pub total_messages: usize,
    pub methods: BTreeMap<String, usize>,
    pub tools: BTreeMap<String, usize>,
    /// `resources/read` counts by uri
    pub resources: BTreeMap<String, usize>,
    /// `prompts/get` counts by prompt name
    pub prompts: BTreeMap<String, usize>,
    pub errors: usize,
}

/// Aggregate statistics over a set of exchanges
pub fn summarize(exchanges: &[RawExchange]) -> TrafficStats {
    let dispatcher = Dispatcher::default();
    let mut stats = TrafficStats::default();
    let mut durations = Vec::new();

    for raw in exchanges {
        match dispatcher.normalize(raw) {
            Ok(ParsedView::Llm(view)) => {
                if let Some(duration) = record_llm(&mut stats.llm, &view) {
                    durations.push(duration);
                }
            }
            Ok(ParsedView::Mcp(view)) => {
                if let RawExchange::Mcp(exchange) = raw {
                    record_mcp(&mut stats.mcp, &view, &exchange.request);
                }
            }
            Err(_) => stats.failed += 1,
        }
    }

    stats.llm.response_time = response_times(&durations);
    stats
}

/// Count one LLM view; returns its duration when usable for timing
fn record_llm(stats: &mut LlmStats, view: &LlmView) -> Option<f64> {
    stats.total_exchanges += 1;

    if let Some(content) = &view.response_content {
        stats.total_tokens = stats.total_tokens.saturating_add(content.usage.total_tokens);
    }
    if let Some(model) = &view.model_info {
        *stats.models.entry(model.model_name.clone()).or_default() += 1;
    }
    *stats
        .status_codes
        .entry(view.basic_info.status.to_string())
        .or_default() += 1;

    view.basic_info
        .duration_ms
        .known()
        .copied()
        .filter(|ms| *ms > 0.0)
}

fn record_mcp(stats: &mut McpStats, view: &McpView, request: &JsonRpcMessage) {
    stats.total_messages += 1;

    *stats
        .methods
        .entry(view.message_info.method.to_string())
        .or_default() += 1;

    if let Some(ToolInfo::Invocation { tool_name, .. }) = &view.tool_info {
        *stats.tools.entry(tool_name.clone()).or_default() += 1;
    }

    match request.method.as_deref() {
        Some(RESOURCES_READ) => {
            if let Some(uri) = request.param_str("uri") {
                *stats.resources.entry(uri.to_string()).or_default() += 1;
            }
        }
        Some(PROMPTS_GET) => {
            if let Some(name) = request.param_str("name") {
                *stats.prompts.entry(name.to_string()).or_default() += 1;
            }
        }
        _ => {}
    }
    if view.error_info.is_some() {
        stats.errors += 1;
    }
}

fn response_times(durations: &[f64]) -> Option<ResponseTimes> {
    if durations.is_empty() {
        return None;
    }
    let min_ms = durations.iter().copied().fold(f64::INFINITY, f64::min);
    let max_ms = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_ms = durations.iter().sum::<f64>() / durations.len() as f64;
    Some(ResponseTimes {
        min_ms,
        avg_ms,
        max_ms,
    })
}
