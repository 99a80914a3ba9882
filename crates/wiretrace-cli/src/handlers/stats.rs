use anyhow::Result;
use std::collections::BTreeMap;
use wiretrace_engine::{TrafficStats, summarize};
use wiretrace_types::Protocol;

use crate::config::Config;
use crate::store::ExchangeStore;
use crate::types::OutputFormat;

pub fn handle(config: &Config, protocol: Option<Protocol>, format: OutputFormat) -> Result<()> {
    let exchanges = ExchangeStore::new(config).load(protocol)?;
    let stats = summarize(&exchanges);

    match format {
        OutputFormat::Json => super::print_json(&stats),
        OutputFormat::Plain => {
            print_stats(&stats, protocol);
            Ok(())
        }
    }
}

fn print_stats(stats: &TrafficStats, protocol: Option<Protocol>) {
    if protocol.is_none_or(|p| p == Protocol::Llm) {
        let llm = &stats.llm;
        println!("LLM exchanges:  {}", llm.total_exchanges);
        println!("Total tokens:   {}", llm.total_tokens);
        if let Some(times) = &llm.response_time {
            println!(
                "Response time:  min {:.0} ms / avg {:.0} ms / max {:.0} ms",
                times.min_ms, times.avg_ms, times.max_ms
            );
        }
        print_counts("Models", &llm.models);
        print_counts("Status codes", &llm.status_codes);
    }

    if protocol.is_none_or(|p| p == Protocol::Mcp) {
        let mcp = &stats.mcp;
        println!("MCP messages:   {}", mcp.total_messages);
        println!("MCP errors:     {}", mcp.errors);
        print_counts("Methods", &mcp.methods);
        print_counts("Tools", &mcp.tools);
        print_counts("Resources", &mcp.resources);
        print_counts("Prompts", &mcp.prompts);
    }

    if stats.failed > 0 {
        println!("Unparseable:    {}", stats.failed);
    }
}

fn print_counts(title: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    println!("{}:", title);
    for (name, count) in counts {
        println!("  {:<32} {}", name, count);
    }
}
