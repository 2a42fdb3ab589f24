//! JSON response bodies.
//!
//! Thin wrappers over serde_json that keep the error type uniform with the
//! other adapters. Key order in the output follows the document's order,
//! which in turn follows template declaration order.

use serde_json::Value;

use crate::FormatError;

/// Serializes a document to compact JSON.
pub fn to_string(doc: &Value) -> Result<String, FormatError> {
    Ok(serde_json::to_string(doc)?)
}

/// Serializes a document to pretty-printed JSON.
pub fn to_string_pretty(doc: &Value) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_output_preserves_key_order() {
        let doc = json!({"user": {"first_name": "Han", "last_name": "Solo"}});
        assert_eq!(
            to_string(&doc).unwrap(),
            r#"{"user":{"first_name":"Han","last_name":"Solo"}}"#
        );
    }

    #[test]
    fn pretty_output_is_indented() {
        let doc = json!({"page": 1});
        let out = to_string_pretty(&doc).unwrap();
        assert!(out.contains("\n  \"page\": 1"));
    }
}
