//! Assertions over API responses.
//!
//! Bodies are addressed with the same dotted paths the payload editor uses.
//! A key applied to an array collects it from every element, so `items.id`
//! reads all ids.
//!
//! # Example
//!
//! ```
//! use api_harness_assert::{verify_common_success, ApiResponse};
//! use api_harness_json::ScalarValue;
//!
//! let response = ApiResponse::new(200, r#"{
//!     "id": "chg_1",
//!     "live_mode": false,
//!     "status": "INITIATED",
//!     "amount": 1.5,
//!     "response": {"code": "101", "message": "Initiated"},
//!     "transaction": {"created": "1718000000000"}
//! }"#);
//!
//! verify_common_success(&response, 200, &[("amount", ScalarValue::Float(1.5))]).unwrap();
//! ```

use thiserror::Error;

pub mod response;
pub use response::ApiResponse;

pub mod verify;
pub use verify::{
    scalar_matches, success_defaults, verify_common_failure, verify_common_success,
    verify_error_body, verify_exact_match, verify_non_available_key, verify_non_empty,
    verify_status_code, ErrorField, SUCCESS_NON_EMPTY,
};

/// The first check that did not hold.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssertionError {
    #[error("Expected status code <{expected}> but was <{actual}>")]
    StatusMismatch { expected: u16, actual: u16 },
    #[error("JSON path {path} doesn't match. Expected: {expected}, actual: {actual}")]
    ValueMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    #[error("JSON path {path} not found in response body")]
    MissingValue { path: String },
    #[error("JSON path {path} is null or empty")]
    EmptyValue { path: String },
    #[error("Key '{key}' should not be present at {parent}")]
    KeyPresent { parent: String, key: String },
    #[error("Response body is not valid JSON")]
    UnparsableBody,
    #[error("{what} doesn't match. Expected: {expected}, actual: {actual}")]
    FieldMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },
}
