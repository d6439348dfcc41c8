//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::http::header::CONTENT_TYPE;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn render(error: &Error) -> (HttpResponse<()>, Vec<u8>) {
    let response = ResponseError::error_response(error);
    let (head, body) = response.into_parts();
    let bytes = to_bytes(body).await.expect("reading response body succeeds");
    (head, bytes.to_vec())
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[case(Error::invalid_request("Missing ID in the URL"), 0)]
#[case(Error::not_found("User Not Found"), 1)]
#[actix_web::test]
async fn client_errors_render_structured_body(
    #[case] error: Error,
    #[case] expected_code: i32,
    expected_trace_id: String,
) {
    let error = error.with_trace_id(expected_trace_id.clone());
    let (response, body) = render(&error).await;

    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(expected_trace_id.as_str())
    );
    let payload: ErrorBody = serde_json::from_slice(&body).expect("error body is JSON");
    assert_eq!(payload.error, expected_code);
    assert_eq!(payload.message, error.message());
}

#[rstest]
#[actix_web::test]
async fn internal_errors_render_plain_text(expected_trace_id: String) {
    let error = Error::with_context("insert failed", "duplicate key")
        .with_trace_id(expected_trace_id.clone());
    let (response, body) = render(&error).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .expect("content type present");
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, b"insert failed: duplicate key");
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let (response, _) = render(&Error::invalid_request("bad")).await;
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[rstest]
fn error_body_uses_wire_code() {
    let body = ErrorBody::from(&Error::invalid_request("Invalid ID format"));
    assert_eq!(
        serde_json::to_value(&body).expect("serialisable"),
        serde_json::json!({ "error": 0, "message": "Invalid ID format" })
    );
}
