//! JSON assertions for CLI and view output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that the value at a JSON pointer equals `expected`.
pub fn assert_pointer(json: &Value, pointer: &str, expected: &Value) -> Result<()> {
    let actual = json
        .pointer(pointer)
        .with_context(|| format!("Missing '{}' in {}", pointer, json))?;

    if actual != expected {
        anyhow::bail!("Expected {} at '{}', got {}", expected, pointer, actual);
    }

    Ok(())
}

/// Assert that a JSON pointer resolves to nothing (the section is absent).
pub fn assert_absent(json: &Value, pointer: &str) -> Result<()> {
    if let Some(value) = json.pointer(pointer) {
        anyhow::bail!("Expected '{}' to be absent, found {}", pointer, value);
    }
    Ok(())
}

/// Assert that a JSON array output has the expected length.
pub fn assert_entry_count(json: &Value, expected: usize) -> Result<()> {
    let entries = json.as_array().context("Expected a JSON array")?;

    if entries.len() != expected {
        anyhow::bail!("Expected {} entries, got {}", expected, entries.len());
    }

    Ok(())
}

/// Assert that list entries appear in exactly the given id order.
pub fn assert_entry_ids(json: &Value, expected: &[&str]) -> Result<()> {
    let entries = json.as_array().context("Expected a JSON array")?;
    let ids: Vec<&str> = entries.iter().filter_map(|e| e["id"].as_str()).collect();

    if ids != expected {
        anyhow::bail!("Expected ids {:?}, got {:?}", expected, ids);
    }

    Ok(())
}
