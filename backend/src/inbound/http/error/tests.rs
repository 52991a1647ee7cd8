//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("Invalid Order: missing customer_id"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("Order with id '0' was not found."), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already shipped"), StatusCode::CONFLICT)]
#[case(
    Error::unsupported_media_type("expected application/json"),
    StatusCode::UNSUPPORTED_MEDIA_TYPE
)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace header is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, trace, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace(expected_trace_id: String) {
    let error = Error::internal("order repository error: relation \"order\" does not exist")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"sql": "SELECT"}));

    let (status, trace, payload) = response_payload(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("Invalid Item: missing price")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "price", "code": "missing_field"}));

    let (status, _, payload) = response_payload(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload, error);
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_omit_the_header() {
    let error = Error::not_found("Item with id '3' was not found.");
    let (_, trace, payload) = response_payload(&error).await;
    assert!(trace.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
