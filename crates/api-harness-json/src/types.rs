//! Core types for dotted-path editing.

use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

/// Failure of a single edit call.
///
/// Every variant aborts the whole call; the caller's input text is never
/// touched, so there is nothing to roll back.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),
    #[error("Expected a JSON object or array at '{segment}'")]
    StructuralMismatch { segment: String },
    #[error("Malformed JSON document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

impl EditError {
    pub(crate) fn mismatch(segment: impl Into<String>) -> Self {
        EditError::StructuralMismatch {
            segment: segment.into(),
        }
    }
}

/// Segment name reported when the document root is not an object.
pub const ROOT_SEGMENT: &str = "$";

// ── KeyPath ───────────────────────────────────────────────────────────────

/// A dotted key path such as `customer.address.city`.
///
/// Always holds at least one segment. The last segment is the leaf key the
/// operation targets; everything before it is navigation. There is no
/// escaping, so keys that contain a literal `.` cannot be addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split `path` on `.`. Inner empty segments are kept, trailing ones are
    /// dropped, so `"..."` becomes the single key `""`.
    ///
    /// ```
    /// use api_harness_json::KeyPath;
    ///
    /// let path = KeyPath::parse("customer.address.city");
    /// assert_eq!(path.navigation(), ["customer", "address"]);
    /// assert_eq!(path.leaf(), "city");
    ///
    /// let flat = KeyPath::parse("amount");
    /// assert!(flat.navigation().is_empty());
    /// assert_eq!(flat.leaf(), "amount");
    ///
    /// assert_eq!(KeyPath::parse("amount."), flat);
    /// ```
    pub fn parse(path: &str) -> Self {
        let mut segments: Vec<String> = path.split('.').map(str::to_string).collect();
        while segments.len() > 1 && segments.last().is_some_and(String::is_empty) {
            segments.pop();
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// All segments but the last.
    pub fn navigation(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The last segment.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// The path without its leaf, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<KeyPath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.navigation().to_vec(),
        })
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        KeyPath::parse(path)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

// ── ScalarValue ───────────────────────────────────────────────────────────

/// A value a MODIFY can store.
///
/// The variant is chosen by the caller, so storage never has to inspect a
/// runtime type.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ScalarValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarValue::String(_) => "string",
            ScalarValue::Integer(_) => "integer",
            ScalarValue::Float(_) => "float",
            ScalarValue::Boolean(_) => "boolean",
        }
    }

    /// The JSON node this scalar is stored as.
    ///
    /// # Errors
    ///
    /// `UnsupportedValueType` for NaN and infinities, which JSON cannot hold.
    pub fn to_json(&self) -> Result<Value, EditError> {
        Ok(match self {
            ScalarValue::String(s) => Value::String(s.clone()),
            ScalarValue::Integer(i) => Value::Number(Number::from(*i)),
            ScalarValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| EditError::UnsupportedValueType(format!("non-finite float {f}")))?,
            ScalarValue::Boolean(b) => Value::Bool(*b),
        })
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => write!(f, "\"{s}\""),
            ScalarValue::Integer(i) => write!(f, "{i}"),
            ScalarValue::Float(v) => write!(f, "{v:?}"),
            ScalarValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<i32> for ScalarValue {
    fn from(i: i32) -> Self {
        ScalarValue::Integer(i64::from(i))
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        ScalarValue::Float(f)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl TryFrom<Value> for ScalarValue {
    type Error = EditError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(ScalarValue::String(s)),
            Value::Bool(b) => Ok(ScalarValue::Boolean(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ScalarValue::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(ScalarValue::Float(f))
                } else {
                    Err(EditError::UnsupportedValueType(format!("number {n}")))
                }
            }
            Value::Null => Err(EditError::UnsupportedValueType("null".to_string())),
            Value::Array(_) => Err(EditError::UnsupportedValueType("array".to_string())),
            Value::Object(_) => Err(EditError::UnsupportedValueType("object".to_string())),
        }
    }
}

// ── Operation ─────────────────────────────────────────────────────────────

/// The operation selector as callers spell it: `"MODIFY"` or `"DELETE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Modify,
    Delete,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Modify => "MODIFY",
            OperationKind::Delete => "DELETE",
        }
    }
}

impl FromStr for OperationKind {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MODIFY" => Ok(OperationKind::Modify),
            "DELETE" => Ok(OperationKind::Delete),
            other => Err(EditError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An edit applied at the leaf key of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Upsert the leaf key with a scalar.
    Modify(ScalarValue),
    /// Remove the leaf key. Absent keys are left alone.
    Delete,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Modify(_) => OperationKind::Modify,
            Operation::Delete => OperationKind::Delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_path_keeps_inner_empty_segments() {
        let path = KeyPath::parse("a..b");
        assert_eq!(path.segments(), ["a", "", "b"]);
        assert_eq!(KeyPath::parse("").segments(), [""]);
    }

    #[test]
    fn test_key_path_drops_trailing_empty_segments() {
        assert_eq!(KeyPath::parse("amount.").segments(), ["amount"]);
        let path = KeyPath::parse("a.b..");
        assert_eq!(path.navigation(), ["a"]);
        assert_eq!(path.leaf(), "b");
        assert_eq!(KeyPath::parse("...").segments(), [""]);
    }

    #[test]
    fn test_key_path_parent() {
        assert_eq!(KeyPath::parse("a.b.c").parent(), Some(KeyPath::parse("a.b")));
        assert_eq!(KeyPath::parse("a").parent(), None);
        assert_eq!(KeyPath::parse("a.b.c").to_string(), "a.b.c");
    }

    #[test]
    fn test_operation_kind_from_str() {
        assert_eq!("MODIFY".parse::<OperationKind>().unwrap(), OperationKind::Modify);
        assert_eq!("DELETE".parse::<OperationKind>().unwrap(), OperationKind::Delete);
        let err = "modify".parse::<OperationKind>().unwrap_err();
        assert!(matches!(err, EditError::UnsupportedOperation(ref s) if s == "modify"));
    }

    #[test]
    fn test_scalar_from_json() {
        assert_eq!(ScalarValue::try_from(json!("x")).unwrap(), ScalarValue::from("x"));
        assert_eq!(ScalarValue::try_from(json!(7)).unwrap(), ScalarValue::Integer(7));
        assert_eq!(ScalarValue::try_from(json!(1.5)).unwrap(), ScalarValue::Float(1.5));
        assert_eq!(ScalarValue::try_from(json!(true)).unwrap(), ScalarValue::Boolean(true));
        for rejected in [json!(null), json!([1]), json!({"a": 1})] {
            assert!(matches!(
                ScalarValue::try_from(rejected),
                Err(EditError::UnsupportedValueType(_))
            ));
        }
    }

    #[test]
    fn test_scalar_to_json() {
        assert_eq!(ScalarValue::Float(2.0).to_json().unwrap(), json!(2.0));
        assert_eq!(ScalarValue::Integer(-3).to_json().unwrap(), json!(-3));
        assert!(matches!(
            ScalarValue::Float(f64::NAN).to_json(),
            Err(EditError::UnsupportedValueType(_))
        ));
    }
}
