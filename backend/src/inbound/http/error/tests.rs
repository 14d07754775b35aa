//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn response_body(error: &Error) -> (StatusCode, Option<String>, ErrorBody) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ascii").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body deserialises");
    (status, trace_id, body)
}

#[rstest]
#[case(Error::invalid_request("Invalid user ID format"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("User not found or underage"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("user store connection failed: mongodb://admin:secret@db")
        .with_trace_id(expected_trace_id.clone());

    let (status, trace_id, body) = response_body(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body, ErrorBody::new("Internal server error"));
}

#[rstest]
#[case(Error::invalid_request("Invalid user ID format"), "Invalid user ID format")]
#[case(Error::not_found("User not found or underage"), "User not found or underage")]
#[actix_web::test]
async fn client_errors_keep_their_message(#[case] error: Error, #[case] message: &str) {
    let (_, _, body) = response_body(&error).await;
    assert_eq!(body.error, message);
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("User not found or underage");
    let (_, trace_id, _) = response_body(&error).await;
    assert!(trace_id.is_none());
}
