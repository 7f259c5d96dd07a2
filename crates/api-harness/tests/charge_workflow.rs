use api_harness::assert::{verify_common_success, verify_non_available_key, ApiResponse};
use api_harness::json::{apply, modify_json, Operation, ScalarValue};
use api_harness::report::{Markup, ReportConfig, ReportSession, Status};
use api_harness::{check, log_request, log_response};
use chrono::Local;
use serde_json::json;

const CHARGE_REQUEST: &str = r#"{"amount":1,"currency":"KWD","customer":{"first_name":"test","email":"test@test.com"},"source":{"id":"src_all"}}"#;

#[test]
fn edited_payload_flows_into_report() {
    let session = ReportSession::start(ReportConfig::default(), Local::now());
    let test = session
        .start_test(&["MC:Charges", "SC:Create", "SECTION:Regression"], "charge without email")
        .unwrap();

    let body = apply(CHARGE_REQUEST, &Operation::Delete, "customer.email").unwrap();
    let body = modify_json(&body, "MODIFY", "amount", json!(2.5)).unwrap();
    log_request(&test, "POST", "/v2/charges", &body);

    let echoed = json!({
        "id": "chg_TS02A",
        "live_mode": false,
        "status": "INITIATED",
        "amount": 2.5,
        "currency": "KWD",
        "customer": {"first_name": "test"},
        "response": {"code": "101", "message": "Initiated"},
        "transaction": {"created": "1718000000000"}
    })
    .to_string();
    let response = ApiResponse::new(200, echoed).with_header("Content-Type", "application/json");
    log_response(&test, &response);

    check(
        &test,
        "charge initiated",
        verify_common_success(&response, 200, &[("amount", ScalarValue::Float(2.5))]),
    )
    .unwrap();
    check(
        &test,
        "email not echoed",
        verify_non_available_key(&response, &["customer.email"]),
    )
    .unwrap();

    assert_eq!(session.status(test.node()), Some(Status::Pass));
    let snapshot = session.snapshot();
    let logs = &snapshot.tests[0].children[0].children[0].logs;
    assert!(matches!(logs[0].markup, Markup::Label { ref text, .. } if text == "POST /v2/charges"));
    assert!(matches!(logs[1].markup, Markup::CodeBlock { ref code, .. } if code == &body));
}

#[test]
fn failed_check_marks_test_failed() {
    let session = ReportSession::start(ReportConfig::default(), Local::now());
    let test = session.start_test(&["MC:Charges", "SC:Create"], "declined").unwrap();

    let response = ApiResponse::new(400, r#"{"errors":[{"code":"1102","error":"Invalid amount"}]}"#);
    log_response(&test, &response);
    let result = check(&test, "charge initiated", verify_common_success(&response, 200, &[]));

    assert!(result.is_err());
    assert_eq!(session.status(test.node()), Some(Status::Fail));
    let category = session.category("Charges").unwrap();
    assert_eq!(session.status(category), Some(Status::Fail));
}

#[test]
fn non_json_body_is_logged_as_text() {
    let session = ReportSession::start(ReportConfig::default(), Local::now());
    let test = session.start_test(&["MC:Gateway"], "bad gateway").unwrap();
    log_response(&test, &ApiResponse::new(502, "Bad Gateway"));

    let snapshot = session.snapshot();
    let logs = &snapshot.tests[0].children[0].children[0].logs;
    assert_eq!(logs.len(), 2);
    assert!(matches!(logs[1].markup, Markup::Label { ref text, .. } if text == "Bad Gateway"));
}
