//! `json-cli` — logic behind the `json-edit` binary.

use api_harness_json::{modify_json, EditError};
use serde_json::Value;

/// Read a command-line value as a JSON literal, falling back to a string.
///
/// ```
/// use api_harness::json_cli::parse_value_arg;
/// use serde_json::json;
///
/// assert_eq!(parse_value_arg("12.5"), json!(12.5));
/// assert_eq!(parse_value_arg("true"), json!(true));
/// assert_eq!(parse_value_arg("\"101\""), json!("101"));
/// assert_eq!(parse_value_arg("INITIATED"), json!("INITIATED"));
/// ```
pub fn parse_value_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Apply one edit to `document`.
///
/// `value` is required for MODIFY and ignored for DELETE.
pub fn edit_document(
    document: &str,
    operation: &str,
    path: &str,
    value: Option<&str>,
) -> Result<String, EditError> {
    let value = value.map(parse_value_arg).unwrap_or(Value::Null);
    modify_json(document.trim(), operation, path, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_document_modify() {
        let out = edit_document("{\"a\":{\"b\":1}}\n", "MODIFY", "a.b", Some("2")).unwrap();
        assert_eq!(out, r#"{"a":{"b":2}}"#);
    }

    #[test]
    fn test_edit_document_modify_needs_value() {
        let err = edit_document("{\"a\":1}", "MODIFY", "a", None).unwrap_err();
        assert!(matches!(err, EditError::UnsupportedValueType(_)));
    }

    #[test]
    fn test_edit_document_delete_ignores_value() {
        let out = edit_document("{\"a\":1,\"b\":2}", "DELETE", "b", Some("[1]")).unwrap();
        assert_eq!(out, r#"{"a":1}"#);
    }
}
