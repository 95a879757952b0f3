//! Tests for error rendering.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::rstest;

const TRACE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = error.error_response();
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("body is readable");
    let body = serde_json::from_slice(&bytes).expect("body is an error payload");
    (status, trace, body)
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
#[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn every_code_has_a_status(#[case] code: ErrorCode, #[case] expected: StatusCode) {
    assert_eq!(status_for(code), expected);
    assert_eq!(Error::new(code, "x").status_code(), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_the_trace_id() {
    let error = Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(serde_json::json!({ "dsn": "postgres://secret" }));

    let (status, trace, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), REDACTED_MESSAGE);
    assert!(body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_pass_through_with_details() {
    let error = Error::conflict("email already in use")
        .with_details(serde_json::json!({ "field": "emailAddress" }));

    let (status, trace, body) = render(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(trace, None);
    assert_eq!(body, error);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_becomes_invalid_request() {
    let req = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &req);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn malformed_query_becomes_invalid_request() {
    let req = TestRequest::default().to_http_request();
    let parse_error = serde_urlencoded_error();
    let err = query_error_handler(QueryPayloadError::Deserialize(parse_error), &req);
    assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
}

fn serde_urlencoded_error() -> serde::de::value::Error {
    serde::de::Error::custom("id must be an integer")
}
