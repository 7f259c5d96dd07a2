//! Dotted-path MODIFY / DELETE over a parsed JSON tree.
//!
//! Arrays are never indexed explicitly. Navigation through an array goes via
//! its first element.
//!
//! A MODIFY aimed at an array is broadcast to every object element, while a
//! DELETE aimed at an array only touches the first element. Existing fixtures
//! depend on both behaviours, so they stay asymmetric.

use serde_json::Value;
use tracing::debug;

use crate::types::{EditError, KeyPath, Operation, OperationKind, ScalarValue, ROOT_SEGMENT};

// ── Entry points ──────────────────────────────────────────────────────────

/// Parse `document`, apply `operation` at `path`, and serialize the result.
///
/// # Errors
///
/// - `MalformedDocument` if `document` is not JSON
/// - `StructuralMismatch` if the root is not an object or a navigation
///   segment does not lead to an object or array
/// - `UnsupportedValueType` if the MODIFY value cannot be stored
///
/// # Example
///
/// ```
/// use api_harness_json::{apply, Operation};
///
/// let doc = r#"{"customer":{"name":"Ann","city":"Oslo"}}"#;
/// let out = apply(doc, &Operation::Modify("Bergen".into()), "customer.city").unwrap();
/// assert_eq!(out, r#"{"customer":{"name":"Ann","city":"Bergen"}}"#);
///
/// let out = apply(doc, &Operation::Delete, "customer.name").unwrap();
/// assert_eq!(out, r#"{"customer":{"city":"Oslo"}}"#);
/// ```
pub fn apply(document: &str, operation: &Operation, path: &str) -> Result<String, EditError> {
    let mut root: Value = serde_json::from_str(document)?;
    apply_to_value(&mut root, operation, &KeyPath::parse(path))?;
    Ok(serde_json::to_string(&root)?)
}

/// Same as [`apply`], with the operation spelled as `"MODIFY"` or `"DELETE"`.
///
/// `value` is only looked at for MODIFY; pass `Value::Null` for DELETE.
///
/// # Errors
///
/// Checked in this order, and the first failure is returned:
///
/// 1. `MalformedDocument` if `document` is not JSON
/// 2. `StructuralMismatch` naming `$` if the root is not an object
/// 3. `UnsupportedOperation` for any selector but `MODIFY` / `DELETE`
/// 4. `StructuralMismatch` if navigation fails
/// 5. `UnsupportedValueType` if the MODIFY value is not a scalar
///
/// ```
/// use api_harness_json::modify_json;
/// use serde_json::json;
///
/// let out = modify_json(r#"{"amount":10}"#, "MODIFY", "amount", json!(12.5)).unwrap();
/// assert_eq!(out, r#"{"amount":12.5}"#);
/// assert!(modify_json(r#"{"amount":10}"#, "PATCH", "amount", json!(1)).is_err());
/// ```
pub fn modify_json(
    document: &str,
    operation: &str,
    path: &str,
    value: Value,
) -> Result<String, EditError> {
    let mut root: Value = serde_json::from_str(document)?;
    if !root.is_object() {
        return Err(EditError::mismatch(ROOT_SEGMENT));
    }
    let kind = operation.parse::<OperationKind>()?;
    let path = KeyPath::parse(path);
    debug!(operation = %kind, path = %path, "applying json edit");

    let target = traverse_to_node(&mut root, path.navigation())?;
    match kind {
        OperationKind::Modify => {
            let value = ScalarValue::try_from(value)?.to_json()?;
            assign_value(target, path.leaf(), &value)?;
        }
        OperationKind::Delete => delete_key(target, path.leaf())?,
    }
    Ok(serde_json::to_string(&root)?)
}

/// Apply `operation` at `path` inside an already parsed document.
///
/// The value is converted and the path walked before anything is inserted or
/// removed, so an error leaves `root` untouched.
pub fn apply_to_value(
    root: &mut Value,
    operation: &Operation,
    path: &KeyPath,
) -> Result<(), EditError> {
    if !root.is_object() {
        return Err(EditError::mismatch(ROOT_SEGMENT));
    }
    debug!(operation = %operation.kind(), path = %path, "applying json edit");

    match operation {
        Operation::Modify(scalar) => {
            let value = scalar.to_json()?;
            let target = traverse_to_node(root, path.navigation())?;
            assign_value(target, path.leaf(), &value)
        }
        Operation::Delete => {
            let target = traverse_to_node(root, path.navigation())?;
            delete_key(target, path.leaf())
        }
    }
}

// ── Tree walkers ──────────────────────────────────────────────────────────

/// Walk `navigation` from `root` and return the target container.
///
/// Before each step an array is replaced by its first element. Every node
/// reached must be an object or an array; otherwise the step's segment is
/// reported. With no navigation segments the root itself is returned.
pub fn traverse_to_node<'a>(
    root: &'a mut Value,
    navigation: &[String],
) -> Result<&'a mut Value, EditError> {
    let mut current = root;
    for segment in navigation {
        current = match current {
            Value::Array(items) => items
                .first_mut()
                .ok_or_else(|| EditError::mismatch(segment.as_str()))?,
            other => other,
        };
        let next = match current {
            Value::Object(map) => map.get_mut(segment.as_str()),
            _ => None,
        };
        current = match next {
            Some(node) if node.is_object() || node.is_array() => node,
            _ => return Err(EditError::mismatch(segment.as_str())),
        };
    }
    Ok(current)
}

/// Upsert `key` with `value` in `target`.
///
/// An object gets the key inserted in place, or appended when new. An array
/// gets the same upsert on each object element; other elements are skipped.
pub fn assign_value(target: &mut Value, key: &str, value: &Value) -> Result<(), EditError> {
    match target {
        Value::Object(map) => {
            map.insert(key.to_string(), value.clone());
            Ok(())
        }
        Value::Array(items) => {
            for item in items.iter_mut().filter(|item| item.is_object()) {
                assign_value(item, key, value)?;
            }
            Ok(())
        }
        _ => Err(EditError::mismatch(key)),
    }
}

/// Remove `key` from `target`.
///
/// An object loses the key if present. An array has the key removed from its
/// first element only, which must be an object.
pub fn delete_key(target: &mut Value, key: &str) -> Result<(), EditError> {
    match target {
        Value::Object(map) => {
            map.shift_remove(key);
            Ok(())
        }
        Value::Array(items) => match items.first_mut() {
            Some(head) if head.is_object() => delete_key(head, key),
            _ => Err(EditError::mismatch(key)),
        },
        _ => Err(EditError::mismatch(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(p: &str) -> Vec<String> {
        KeyPath::parse(p).navigation().to_vec()
    }

    #[test]
    fn test_traverse_without_navigation_returns_root() {
        let mut doc = json!({"a": 1});
        let node = traverse_to_node(&mut doc, &[]).unwrap();
        assert_eq!(node, &json!({"a": 1}));
    }

    #[test]
    fn test_traverse_descends_through_array_head() {
        let mut doc = json!({"items": [{"meta": {"x": 1}}, {"meta": {"x": 2}}]});
        let node = traverse_to_node(&mut doc, &path("items.meta.x")).unwrap();
        assert_eq!(node, &json!({"x": 1}));
    }

    #[test]
    fn test_traverse_reports_scalar_segment() {
        let mut doc = json!({"a": {"b": 5}});
        let err = traverse_to_node(&mut doc, &path("a.b.c")).unwrap_err();
        assert!(matches!(err, EditError::StructuralMismatch { ref segment } if segment == "b"));
    }

    #[test]
    fn test_traverse_reports_missing_segment() {
        let mut doc = json!({"a": {}});
        let err = traverse_to_node(&mut doc, &path("a.missing.c")).unwrap_err();
        assert!(matches!(err, EditError::StructuralMismatch { ref segment } if segment == "missing"));
    }

    #[test]
    fn test_traverse_empty_array_fails() {
        let mut doc = json!({"items": []});
        let err = traverse_to_node(&mut doc, &path("items.meta.x")).unwrap_err();
        assert!(matches!(err, EditError::StructuralMismatch { ref segment } if segment == "meta"));
    }

    #[test]
    fn test_assign_keeps_position_of_existing_key() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        assign_value(&mut doc, "b", &json!("x")).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":1,"b":"x","c":3}"#);
        assign_value(&mut doc, "d", &json!(true)).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":1,"b":"x","c":3,"d":true}"#);
    }

    #[test]
    fn test_assign_skips_non_object_elements() {
        let mut doc = json!([{"a": 1}, 7, "s", {"b": 2}]);
        assign_value(&mut doc, "k", &json!(0)).unwrap();
        assert_eq!(doc, json!([{"a": 1, "k": 0}, 7, "s", {"b": 2, "k": 0}]));
    }

    #[test]
    fn test_assign_on_scalar_fails() {
        let mut doc = json!(3);
        assert!(assign_value(&mut doc, "k", &json!(0)).is_err());
    }

    #[test]
    fn test_delete_keeps_order_of_remaining_keys() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        delete_key(&mut doc, "a").unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"b":2,"c":3}"#);
    }

    #[test]
    fn test_delete_on_array_with_scalar_head_fails() {
        let mut doc = json!([1, {"k": 1}]);
        assert!(delete_key(&mut doc, "k").is_err());
        let mut empty = json!([]);
        assert!(delete_key(&mut empty, "k").is_err());
    }

    #[test]
    fn test_apply_rejects_non_object_root() {
        let err = apply("[1,2]", &Operation::Delete, "a").unwrap_err();
        assert!(matches!(err, EditError::StructuralMismatch { ref segment } if segment == "$"));
    }

    #[test]
    fn test_apply_rejects_malformed_document() {
        let err = apply("{not json", &Operation::Delete, "a").unwrap_err();
        assert!(matches!(err, EditError::MalformedDocument(_)));
    }

    #[test]
    fn test_modify_json_delete_ignores_value() {
        let out = modify_json(r#"{"a":1,"b":2}"#, "DELETE", "a", json!(null)).unwrap();
        assert_eq!(out, r#"{"b":2}"#);
    }

    #[test]
    fn test_modify_json_error_order() {
        let err = modify_json("{not json", "PATCH", "a", json!(null)).unwrap_err();
        assert!(matches!(err, EditError::MalformedDocument(_)));

        let err = modify_json("[]", "PATCH", "a", json!(1)).unwrap_err();
        assert!(matches!(err, EditError::StructuralMismatch { ref segment } if segment == "$"));

        let err = modify_json(r#"{"a":1}"#, "PATCH", "x.y", json!(null)).unwrap_err();
        assert!(matches!(err, EditError::UnsupportedOperation(_)));

        let err = modify_json(r#"{"a":1}"#, "MODIFY", "x.y", json!(null)).unwrap_err();
        assert!(matches!(err, EditError::StructuralMismatch { ref segment } if segment == "x"));
    }

    #[test]
    fn test_failed_edit_leaves_document_untouched() {
        let original = json!({"a": {"b": "scalar"}, "items": [{"k": 1}, {"k": 2}]});

        let mut doc = original.clone();
        let err = apply_to_value(&mut doc, &Operation::Modify(ScalarValue::Integer(1)), &KeyPath::parse("a.b.c"))
            .unwrap_err();
        assert!(matches!(err, EditError::StructuralMismatch { .. }));
        assert_eq!(doc, original);

        let mut doc = original.clone();
        let err = apply_to_value(&mut doc, &Operation::Modify(ScalarValue::Float(f64::NAN)), &KeyPath::parse("items.k"))
            .unwrap_err();
        assert!(matches!(err, EditError::UnsupportedValueType(_)));
        assert_eq!(doc, original);

        let mut doc = original.clone();
        assert!(apply_to_value(&mut doc, &Operation::Delete, &KeyPath::parse("a.b.c")).is_err());
        assert_eq!(doc, original);
    }

    #[test]
    fn test_trailing_dot_targets_last_named_key() {
        let out = apply(r#"{"amount":1}"#, &Operation::Modify(ScalarValue::Integer(5)), "amount.").unwrap();
        assert_eq!(out, r#"{"amount":5}"#);
        let out = apply(r#"{"a":{"b":1,"c":2}}"#, &Operation::Delete, "a.b.").unwrap();
        assert_eq!(out, r#"{"a":{"c":2}}"#);
    }

    #[test]
    fn test_modify_json_rejects_null_value() {
        let err = modify_json(r#"{"a":1}"#, "MODIFY", "a", json!(null)).unwrap_err();
        assert!(matches!(err, EditError::UnsupportedValueType(_)));
    }
}
