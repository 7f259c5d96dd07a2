//! Read-only helpers.
//!
//! These never mutate and are lenient: a parse failure is logged and turned
//! into `None` instead of an error. The mutating editor in [`crate::edit`]
//! never degrades this way.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::types::{EditError, KeyPath};

/// Parse `text` as JSON, or log and return `None`.
///
/// ```
/// use api_harness_json::convert_to_json;
///
/// assert!(convert_to_json(r#"{"ok":true}"#).is_some());
/// assert!(convert_to_json("<html>").is_none());
/// ```
pub fn convert_to_json(text: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, "error processing JSON");
            None
        }
    }
}

/// Serialize any payload object to compact JSON text.
pub fn to_json_string<T: Serialize + ?Sized>(payload: &T) -> Result<String, EditError> {
    Ok(serde_json::to_string(payload)?)
}

/// Look up a dotted path.
///
/// A key applied to an array is applied to each of its object elements and
/// the hits are collected into an array, so `items.id` over
/// `{"items":[{"id":1},{"id":2}]}` yields `[1,2]`. Returns `None` when no
/// element has the key or a scalar is met mid-path.
///
/// ```
/// use api_harness_json::{select, KeyPath};
/// use serde_json::json;
///
/// let doc = json!({"response": {"code": "101"}, "items": [{"id": 1}, {"id": 2}]});
/// assert_eq!(select(&doc, &KeyPath::parse("response.code")), Some(json!("101")));
/// assert_eq!(select(&doc, &KeyPath::parse("items.id")), Some(json!([1, 2])));
/// assert_eq!(select(&doc, &KeyPath::parse("response.missing")), None);
/// ```
pub fn select(root: &Value, path: &KeyPath) -> Option<Value> {
    select_from(root, path.segments())
}

fn select_from(node: &Value, segments: &[String]) -> Option<Value> {
    let Some((key, rest)) = segments.split_first() else {
        return Some(node.clone());
    };
    match node {
        Value::Object(map) => select_from(map.get(key.as_str())?, rest),
        Value::Array(items) => {
            let hits: Vec<Value> = items
                .iter()
                .filter_map(|item| select_from(item, segments))
                .collect();
            if hits.is_empty() {
                None
            } else {
                Some(Value::Array(hits))
            }
        }
        _ => None,
    }
}
