//! Dotted-path editing of JSON payloads.
//!
//! Test fixtures are usually one valid request body that each test tweaks
//! slightly before sending. This crate edits such bodies as JSON text,
//! addressed by dotted paths like `customer.address.city`.
//!
//! # Example
//!
//! ```
//! use api_harness_json::{apply, modify_json, Operation, ScalarValue};
//! use serde_json::json;
//!
//! let body = r#"{"amount":10,"items":[{"sku":"a","qty":1},{"sku":"b","qty":2}]}"#;
//!
//! // MODIFY aimed at an array reaches every object element
//! let out = apply(body, &Operation::Modify(ScalarValue::Integer(5)), "items.qty").unwrap();
//! assert_eq!(out, r#"{"amount":10,"items":[{"sku":"a","qty":5},{"sku":"b","qty":5}]}"#);
//!
//! // DELETE aimed at an array only reaches the first element
//! let out = modify_json(body, "DELETE", "items.qty", json!(null)).unwrap();
//! assert_eq!(out, r#"{"amount":10,"items":[{"sku":"a"},{"sku":"b","qty":2}]}"#);
//! ```

pub mod types;
pub use types::{EditError, KeyPath, Operation, OperationKind, ScalarValue, ROOT_SEGMENT};

pub mod edit;
pub use edit::{apply, apply_to_value, assign_value, delete_key, modify_json, traverse_to_node};

pub mod read;
pub use read::{convert_to_json, select, to_json_string};
