use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of an upstream record, kept in the JSON form the service sent.
///
/// Most records use Mongo object ids or product codes (strings), but some
/// order lines reference products by integer. Both forms serialize back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Text(String),
    Number(i64),
}

impl EntityId {
    /// Reads an identifier out of a raw JSON value.
    ///
    /// Returns `None` for anything that is neither a string nor an integer.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Number),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_text_and_number_ids() {
        let text: EntityId = serde_json::from_value(json!("5d1f0c")).unwrap();
        let number: EntityId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(text, EntityId::from("5d1f0c"));
        assert_eq!(number, EntityId::from(42));
    }

    #[test]
    fn serializes_back_to_original_json_form() {
        assert_eq!(serde_json::to_value(EntityId::from("p1")).unwrap(), json!("p1"));
        assert_eq!(serde_json::to_value(EntityId::from(43)).unwrap(), json!(43));
    }

    #[test]
    fn from_value_rejects_non_scalar_ids() {
        assert!(EntityId::from_value(&json!({"oid": "x"})).is_none());
        assert!(EntityId::from_value(&json!(null)).is_none());
        assert!(EntityId::from_value(&json!(1.5)).is_none());
    }

    #[test]
    fn text_and_number_ids_are_distinct() {
        assert_ne!(EntityId::from("1"), EntityId::from(1));
    }

    #[test]
    fn display_renders_query_value() {
        assert_eq!(EntityId::from("abc").to_string(), "abc");
        assert_eq!(EntityId::from(7).to_string(), "7");
    }
}
