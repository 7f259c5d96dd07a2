//! Response checks.
//!
//! Each function stops at the first failing check and reports it.

use api_harness_json::{select, KeyPath, ScalarValue};
use serde_json::Value;
use tracing::debug;

use crate::response::ApiResponse;
use crate::AssertionError;

fn body_json(response: &ApiResponse) -> Result<Value, AssertionError> {
    response.json().ok_or(AssertionError::UnparsableBody)
}

/// Check the status code.
pub fn verify_status_code(response: &ApiResponse, expected: u16) -> Result<(), AssertionError> {
    debug!(expected, actual = response.status, "verifying status code");
    if response.status != expected {
        return Err(AssertionError::StatusMismatch {
            expected,
            actual: response.status,
        });
    }
    Ok(())
}

/// Whether `actual` holds the same scalar as `expected`.
///
/// Floats are compared at single precision. An integer never equals a float.
pub fn scalar_matches(expected: &ScalarValue, actual: &Value) -> bool {
    match expected {
        ScalarValue::String(s) => actual.as_str() == Some(s.as_str()),
        ScalarValue::Integer(i) => !actual.is_f64() && actual.as_i64() == Some(*i),
        ScalarValue::Float(f) => match actual {
            Value::Number(n) if n.is_f64() => n.as_f64().map(|a| a as f32) == Some(*f as f32),
            _ => false,
        },
        ScalarValue::Boolean(b) => actual.as_bool() == Some(*b),
    }
}

/// Each dotted path must hold exactly the expected scalar.
///
/// ```
/// use api_harness_assert::{verify_exact_match, ApiResponse};
/// use api_harness_json::ScalarValue;
///
/// let response = ApiResponse::new(200, r#"{"status":"INITIATED","response":{"code":"101"}}"#);
/// verify_exact_match(&response, &[
///     ("status", ScalarValue::from("INITIATED")),
///     ("response.code", ScalarValue::from("101")),
/// ]).unwrap();
/// assert!(verify_exact_match(&response, &[("status", ScalarValue::from("CAPTURED"))]).is_err());
/// ```
pub fn verify_exact_match(
    response: &ApiResponse,
    checks: &[(&str, ScalarValue)],
) -> Result<(), AssertionError> {
    let body = body_json(response)?;
    for (path, expected) in checks {
        let actual = select(&body, &KeyPath::parse(path)).ok_or_else(|| {
            AssertionError::MissingValue {
                path: path.to_string(),
            }
        })?;
        if !scalar_matches(expected, &actual) {
            return Err(AssertionError::ValueMismatch {
                path: path.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}

/// Each path must hold something other than null or `""`.
pub fn verify_non_empty(response: &ApiResponse, paths: &[&str]) -> Result<(), AssertionError> {
    let body = body_json(response)?;
    for path in paths {
        match select(&body, &KeyPath::parse(path)) {
            None | Some(Value::Null) => {
                return Err(AssertionError::EmptyValue {
                    path: path.to_string(),
                })
            }
            Some(Value::String(s)) if s.is_empty() => {
                return Err(AssertionError::EmptyValue {
                    path: path.to_string(),
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// The leaf key of each path must be absent from the object at its parent.
///
/// Paths without a dot are checked against the root. A parent that is
/// missing, or is not an object, cannot hold the key and passes.
pub fn verify_non_available_key(
    response: &ApiResponse,
    paths: &[&str],
) -> Result<(), AssertionError> {
    let body = body_json(response)?;
    for path in paths {
        let path = KeyPath::parse(path);
        let (parent, parent_name) = match path.parent() {
            Some(parent_path) => (select(&body, &parent_path), parent_path.to_string()),
            None => (Some(body.clone()), "$".to_string()),
        };
        if let Some(Value::Object(map)) = parent {
            if map.contains_key(path.leaf()) {
                return Err(AssertionError::KeyPresent {
                    parent: parent_name,
                    key: path.leaf().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Fields every successful charge-like response carries.
pub fn success_defaults() -> Vec<(&'static str, ScalarValue)> {
    vec![
        ("live_mode", ScalarValue::Boolean(false)),
        ("status", ScalarValue::from("INITIATED")),
        ("response.code", ScalarValue::from("101")),
    ]
}

/// Path that must be filled in on success.
pub const SUCCESS_NON_EMPTY: &str = "transaction.created";

/// Status, the [`success_defaults`], `extra_checks`, then a non-empty
/// [`SUCCESS_NON_EMPTY`].
pub fn verify_common_success(
    response: &ApiResponse,
    status: u16,
    extra_checks: &[(&str, ScalarValue)],
) -> Result<(), AssertionError> {
    verify_status_code(response, status)?;
    verify_exact_match(response, &success_defaults())?;
    if !extra_checks.is_empty() {
        verify_exact_match(response, extra_checks)?;
    }
    verify_non_empty(response, &[SUCCESS_NON_EMPTY])
}

/// Status, then `checks`.
pub fn verify_common_failure(
    response: &ApiResponse,
    status: u16,
    checks: &[(&str, ScalarValue)],
) -> Result<(), AssertionError> {
    verify_status_code(response, status)?;
    verify_exact_match(response, checks)
}

/// Which member of the first error entry carries the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    /// `/errors/0/error`
    Error,
    /// `/errors/0/description`
    Description,
}

impl ErrorField {
    pub fn pointer(&self) -> &'static str {
        match self {
            ErrorField::Error => "/errors/0/error",
            ErrorField::Description => "/errors/0/description",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ErrorField::Error => "Error type",
            ErrorField::Description => "Error description",
        }
    }
}

/// Text of the node at `pointer`: strings unquoted, other scalars printed,
/// missing nodes and containers empty.
fn text_at(json: &Value, pointer: &str) -> String {
    match json.pointer(pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(_)) | Some(Value::Object(_)) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Compare the response code and the first entry of an `errors` array.
///
/// ```
/// use api_harness_assert::{verify_error_body, ErrorField};
/// use serde_json::json;
///
/// let body = json!({"errors": [{"code": "1108", "error": "Invalid currency"}]});
/// verify_error_body(&body, ErrorField::Error, 400, 400, "1108", "Invalid currency").unwrap();
/// assert!(verify_error_body(&body, ErrorField::Description, 400, 400, "1108", "Invalid currency").is_err());
/// ```
pub fn verify_error_body(
    json: &Value,
    field: ErrorField,
    response_code: u16,
    expected_response_code: u16,
    code: &str,
    message: &str,
) -> Result<(), AssertionError> {
    if response_code != expected_response_code {
        return Err(AssertionError::FieldMismatch {
            what: "Response code",
            expected: expected_response_code.to_string(),
            actual: response_code.to_string(),
        });
    }
    let actual_code = text_at(json, "/errors/0/code");
    if actual_code != code {
        return Err(AssertionError::FieldMismatch {
            what: "Error code",
            expected: code.to_string(),
            actual: actual_code,
        });
    }
    let actual_message = text_at(json, field.pointer());
    if actual_message != message {
        return Err(AssertionError::FieldMismatch {
            what: field.label(),
            expected: message.to_string(),
            actual: actual_message,
        });
    }
    Ok(())
}
