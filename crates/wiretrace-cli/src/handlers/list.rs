use anyhow::Result;
use wiretrace_engine::{ListEntry, list_entries};
use wiretrace_types::Protocol;

use crate::config::Config;
use crate::store::ExchangeStore;
use crate::types::OutputFormat;

pub fn handle(
    config: &Config,
    protocol: Option<Protocol>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let exchanges = ExchangeStore::new(config).load(protocol)?;
    let limit = limit.unwrap_or(config.list_limit);
    let entries = list_entries(&exchanges, limit, &config.preview);

    match format {
        OutputFormat::Json => super::print_json(&entries),
        OutputFormat::Plain => {
            print_entries(&entries);
            Ok(())
        }
    }
}

fn print_entries(entries: &[ListEntry]) {
    if entries.is_empty() {
        println!("No exchanges found.");
        return;
    }

    for entry in entries {
        println!(
            "{}  [{}]  {}  {}",
            entry.timestamp, entry.protocol, entry.id, entry.headline
        );
        for line in entry.preview.lines() {
            println!("    {}", line);
        }
    }
}
