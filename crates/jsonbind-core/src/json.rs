//! JSON value model and text boundary.
//!
//! Values are `serde_json` values built with `preserve_order`, so object
//! members keep their insertion order and keys are unique.

use crate::error::Result;

pub use serde_json::{Map, Number};

/// A parsed JSON value.
pub type JsonValue = serde_json::Value;

/// Parses JSON text.
pub fn parse(text: &str) -> Result<JsonValue> {
    Ok(serde_json::from_str(text)?)
}

/// Prints JSON compactly.
pub fn to_string(json: &JsonValue) -> Result<String> {
    Ok(serde_json::to_string(json)?)
}

pub fn to_string_pretty(json: &JsonValue) -> Result<String> {
    Ok(serde_json::to_string_pretty(json)?)
}

/// Renders a value for diagnostics: compact JSON text.
pub fn render(json: &JsonValue) -> String {
    json.to_string()
}

/// Standard "expected X, found: <json>" message used by the built-in converters.
pub fn expected(kind: &str, found: &JsonValue) -> String {
    format!("expected {}, found: {}", kind, render(found))
}

/// Builds an object from `(key, value)` pairs, in order.
pub fn object<K, I>(members: I) -> JsonValue
where
    K: Into<String>,
    I: IntoIterator<Item = (K, JsonValue)>,
{
    JsonValue::Object(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_preserves_member_order() {
        let value = parse(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(to_string(&value).unwrap(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_pretty_output_keeps_member_order() {
        let value = object([("b", json!([1])), ("a", json!(null))]);
        assert_eq!(
            to_string_pretty(&value).unwrap(),
            "{\n  \"b\": [\n    1\n  ],\n  \"a\": null\n}"
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let value = parse(r#"{"a": 1, "A": 2}"#).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_expected_message_renders_found_value() {
        assert_eq!(expected("integer", &json!("foo")), r#"expected integer, found: "foo""#);
        assert_eq!(expected("object", &JsonValue::Null), "expected object, found: null");
    }

    #[test]
    fn test_parse_rejects_trailing_commas() {
        assert!(parse("[1, 2,]").is_err());
    }

    #[test]
    fn test_object_builder() {
        let value = object([("b", json!(1)), ("a", json!(2))]);
        assert_eq!(render(&value), r#"{"b":1,"a":2}"#);
    }
}
