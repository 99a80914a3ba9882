use anyhow::{Context, Result};
use std::path::Path;
use wiretrace_engine::Dispatcher;
use wiretrace_types::RawExchange;

use super::view::print_outcome;
use crate::config::Config;
use crate::types::OutputFormat;

pub fn handle(config: &Config, file: &Path, tag: Option<&str>, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let raw: RawExchange = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a RawExchange record", file.display()))?;

    let tag = tag.unwrap_or(raw.protocol().as_str());
    let outcome = Dispatcher::with_limits(config.preview).outcome(tag, &raw);
    print_outcome(&outcome, format)
}
