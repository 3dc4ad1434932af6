use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::decision::{DecisionEngine, LoanRequest, PolicyConstants};

/// Born 1985-06-15, segment 1201: carries debt.
pub(super) const DEBT_CODE: &str = "38506151201";
/// Born 1985-06-15, segment 3008: Estonia, modifier 100.
pub(super) const SEGMENT_1_CODE: &str = "38506153008";
/// Born 1985-06-15, segment 5503: Latvia, modifier 300.
pub(super) const SEGMENT_2_CODE: &str = "38506155503";
/// Born 1985-06-15, segment 8004: Lithuania, modifier 1000.
pub(super) const SEGMENT_3_CODE: &str = "38506158004";
/// Born 2020-01-01, segment 5508.
pub(super) const CHILD_CODE: &str = "62001015508";
/// Segment 3 code with its check digit altered.
pub(super) const BAD_CHECKSUM_CODE: &str = "38506158005";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::default()
}

pub(super) fn engine_with(policy: PolicyConstants) -> DecisionEngine {
    DecisionEngine::new(policy).expect("policy is consistent")
}

pub(super) fn request(code: &str, amount: i64, period: i64) -> LoanRequest {
    LoanRequest::new(code, amount, period)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

pub(super) async fn assert_rejection(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let payload = read_json_body(response).await;
    assert_eq!(payload["loanAmount"], Value::Null);
    assert_eq!(payload["loanPeriod"], Value::Null);
    assert_eq!(payload["errorMessage"], Value::String(message.to_string()));
}
