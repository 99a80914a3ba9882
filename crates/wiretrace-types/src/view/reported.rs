use serde::{Serialize, Serializer};

/// A field that is always present in a view: either the captured value or the
/// literal `"unknown"`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reported<T> {
    Known(T),
    #[default]
    Unknown,
}

impl<T> Reported<T> {
    pub const SENTINEL: &'static str = "unknown";

    pub fn known(&self) -> Option<&T> {
        match self {
            Reported::Known(value) => Some(value),
            Reported::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Reported::Unknown)
    }
}

impl<T> From<Option<T>> for Reported<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Reported::Known(v),
            None => Reported::Unknown,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Reported<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reported::Known(value) => std::fmt::Display::fmt(value, f),
            Reported::Unknown => f.write_str(Self::SENTINEL),
        }
    }
}

impl<T: Serialize> Serialize for Reported<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Reported::Known(value) => value.serialize(serializer),
            Reported::Unknown => serializer.serialize_str(Self::SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_known_and_unknown() {
        assert_eq!(
            serde_json::to_value(Reported::Known(200u16)).unwrap(),
            json!(200)
        );
        assert_eq!(
            serde_json::to_value(Reported::<u16>::Unknown).unwrap(),
            json!("unknown")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Reported::Known("POST").to_string(), "POST");
        assert_eq!(Reported::<&str>::Unknown.to_string(), "unknown");
    }
}
