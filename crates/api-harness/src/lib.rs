//! api-harness — helpers for API test automation.
//!
//! Re-exports the three building blocks and adds the glue that ties them
//! together in a test:
//!
//! - [`json`]: edit request payloads by dotted path
//! - [`assert`]: check status codes and response bodies
//! - [`report`]: file results into a category / sub-category / test report
//!
//! # Example
//!
//! ```
//! use api_harness::assert::{verify_status_code, ApiResponse};
//! use api_harness::json::modify_json;
//! use api_harness::report::{ReportConfig, ReportSession, Status};
//! use api_harness::{check, log_request, log_response};
//! use serde_json::json;
//!
//! let session = ReportSession::start(ReportConfig::default(), chrono::Local::now());
//! let test = session.start_test(&["MC:Charges", "SC:Create"], "zero amount is rejected").unwrap();
//!
//! let body = modify_json(r#"{"amount":1,"currency":"KWD"}"#, "MODIFY", "amount", json!(0)).unwrap();
//! log_request(&test, "POST", "/v2/charges", &body);
//!
//! let response = ApiResponse::new(400, r#"{"errors":[{"code":"1102"}]}"#);
//! log_response(&test, &response);
//! check(&test, "status is 400", verify_status_code(&response, 400)).unwrap();
//!
//! assert_eq!(session.status(test.node()), Some(Status::Pass));
//! ```

pub use api_harness_assert as assert;
pub use api_harness_json as json;
pub use api_harness_report as report;

pub mod json_cli;

use api_harness_assert::{ApiResponse, AssertionError};
use api_harness_report::TestContext;

/// Log the outgoing request line and its JSON body.
pub fn log_request(test: &TestContext<'_>, method: &str, url: &str, body: &str) {
    test.info(&format!("{method} {url}"));
    if !body.is_empty() {
        test.json(body);
    }
}

/// Log status, headers, and body of a response.
///
/// Bodies that parse as JSON are logged as a JSON block, anything else as
/// plain info text.
pub fn log_response(test: &TestContext<'_>, response: &ApiResponse) {
    test.info(&format!("Response status: {}", response.status));
    if !response.headers.is_empty() {
        test.headers(&response.headers);
    }
    match response.json() {
        Some(_) => test.json(&response.body),
        None if response.body.is_empty() => {}
        None => test.info(&response.body),
    }
}

/// Record an assertion outcome on `test` and pass it through.
pub fn check(
    test: &TestContext<'_>,
    description: &str,
    result: Result<(), AssertionError>,
) -> Result<(), AssertionError> {
    match &result {
        Ok(()) => test.pass(description),
        Err(err) => test.fail(&format!("{description}: {err}")),
    }
    result
}
