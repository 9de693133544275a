//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no auth"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("stale"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::invalid_request("missing required field: amount")
        .with_details(json!({ "field": "amount", "code": "missing_field" }));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "missing required field: amount",
            "details": { "field": "amount", "code": "missing_field" },
        })
    );
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "not_found", "message": "  " }));
    assert!(result.is_err());
}

#[rstest]
fn deserialisation_accepts_snake_case_trace_alias(expected_trace_id: String) {
    let error: Error = serde_json::from_value(json!({
        "code": "conflict",
        "message": "revision mismatch",
        "trace_id": expected_trace_id,
    }))
    .expect("valid payload");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
