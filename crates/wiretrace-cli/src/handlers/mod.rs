pub mod list;
pub mod parse;
pub mod show;
pub mod stats;
mod view;

use anyhow::Result;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
