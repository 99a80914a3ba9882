use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use wiretrace_types::{PreviewLimits, Protocol, RawExchange, Reported};

use crate::summary::{headline, preview};

/// One row of the exchange listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: Reported<String>,
    pub timestamp: Reported<String>,
    pub protocol: Protocol,
    pub headline: String,
    pub preview: String,
}

impl ListEntry {
    pub fn from_exchange(raw: &RawExchange, limits: &PreviewLimits) -> Self {
        Self {
            id: raw.id().map(str::to_string).into(),
            timestamp: raw.timestamp().map(str::to_string).into(),
            protocol: raw.protocol(),
            headline: headline(raw),
            preview: preview(raw, limits),
        }
    }
}

/// Build listing rows, newest first, keeping at most `limit`
///
/// Exchanges whose timestamp cannot be parsed sort after all others; ties keep
/// their input order.
pub fn list_entries(exchanges: &[RawExchange], limit: usize, limits: &PreviewLimits) -> Vec<ListEntry> {
    let mut ordered: Vec<(Option<NaiveDateTime>, &RawExchange)> = exchanges
        .iter()
        .map(|raw| (raw.timestamp().and_then(parse_timestamp), raw))
        .collect();

    ordered.sort_by(|(a, _), (b, _)| b.cmp(a));

    ordered
        .into_iter()
        .take(limit)
        .map(|(_, raw)| ListEntry::from_exchange(raw, limits))
        .collect()
}

/// Parse recorder timestamps: RFC 3339, or naive ISO-8601 with `T` or a space
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn llm(id: &str, timestamp: Option<&str>) -> RawExchange {
        let mut value = json!({"protocol": "llm", "id": id});
        if let Some(ts) = timestamp {
            value["timestamp"] = json!(ts);
        }
        serde_json::from_value(value).unwrap()
    }

    fn ids(entries: &[ListEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-05-01T10:00:00Z").is_some());
        assert!(parse_timestamp("2024-05-01T12:00:00+02:00").is_some());
        assert!(parse_timestamp("2024-05-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("2024-05-01 10:00:00.123456").is_some());
        assert!(parse_timestamp("2024-05-01 10:00:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert_eq!(
            parse_timestamp("2024-05-01T12:00:00+02:00"),
            parse_timestamp("2024-05-01T10:00:00")
        );
    }

    #[test]
    fn test_newest_first_with_limit() {
        let exchanges = vec![
            llm("old", Some("2024-05-01T10:00:00")),
            llm("newest", Some("2024-05-03 09:00:00.5")),
            llm("middle", Some("2024-05-02T10:00:00Z")),
        ];
        let entries = list_entries(&exchanges, 2, &PreviewLimits::default());
        assert_eq!(ids(&entries), vec!["newest", "middle"]);
    }

    #[test]
    fn test_unparsable_sort_last_in_input_order() {
        let exchanges = vec![
            llm("no-ts-1", None),
            llm("garbled", Some("not a time")),
            llm("dated", Some("2024-05-01T10:00:00")),
            llm("no-ts-2", None),
        ];
        let entries = list_entries(&exchanges, 10, &PreviewLimits::default());
        assert_eq!(ids(&entries), vec!["dated", "no-ts-1", "garbled", "no-ts-2"]);
    }

    #[test]
    fn test_entry_fields() {
        let raw: RawExchange = serde_json::from_value(json!({
            "protocol": "mcp",
            "id": "sess_0",
            "request": {"method": "ping"}
        }))
        .unwrap();
        let entry = ListEntry::from_exchange(&raw, &PreviewLimits::default());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "sess_0",
                "timestamp": "unknown",
                "protocol": "mcp",
                "headline": "MCP: ping",
                "preview": "method: ping"
            })
        );
    }
}
