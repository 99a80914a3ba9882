// Engine facade - routes raw exchanges to the protocol normalizers and builds
// the list and statistics projections the CLI presents

pub mod dispatch;
pub mod list;
pub mod stats;
pub mod summary;

pub use dispatch::Dispatcher;
pub use list::{ListEntry, list_entries};
pub use stats::{LlmStats, McpStats, ResponseTimes, TrafficStats, summarize};
pub use summary::{headline, preview};

use wiretrace_types::{NormalizeOutcome, ParsedView, RawExchange, Result};

// Façade API - stable entry points for the CLI layer

/// Normalize an exchange under an explicit protocol tag
pub fn normalize_exchange(tag: &str, raw: &RawExchange) -> Result<ParsedView> {
    Dispatcher::default().dispatch(tag, raw)
}

/// Normalize an exchange under its own protocol
pub fn normalize(raw: &RawExchange) -> Result<ParsedView> {
    Dispatcher::default().normalize(raw)
}

/// Normalize for display: the view, or an `{error, code}` value
pub fn normalize_outcome(tag: &str, raw: &RawExchange) -> NormalizeOutcome {
    Dispatcher::default().outcome(tag, raw)
}
