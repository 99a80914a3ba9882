use serde_json::Value;

/// Truncate a string to at most `max` characters, appending `...` when cut
///
/// Counts Unicode scalar values, so multi-byte text is never split mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}

/// Canonical single-line text form of a JSON value
///
/// Strings are returned verbatim, null becomes empty text, everything else is
/// compact JSON.
pub fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Character length as the viewer reports it
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Render a JSON-RPC id (string or number) as display text
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate(&"a".repeat(80), 80), "a".repeat(80));
        assert_eq!(
            truncate(&"a".repeat(100), 80),
            format!("{}...", "a".repeat(80))
        );
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "天气怎么样今天";
        assert_eq!(truncate(text, 2), "天气...");
        assert_eq!(truncate(text, 7), text);
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_canonical_text_is_compact() {
        let value = json!({"a": [true, null], "b": 1});
        assert_eq!(canonical_text(&value), r#"{"a":[true,null],"b":1}"#);
        assert_eq!(canonical_text(&json!("plain")), "plain");
        assert_eq!(canonical_text(&Value::Null), "");
    }

    #[test]
    fn test_id_text() {
        assert_eq!(id_text(&json!(7)), Some("7".to_string()));
        assert_eq!(id_text(&json!("req-1")), Some("req-1".to_string()));
        assert_eq!(id_text(&Value::Null), None);
    }
}
