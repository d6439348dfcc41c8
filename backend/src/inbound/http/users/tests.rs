//! Tests for users API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockUserRepository, UserPersistenceError, UserRepository};
use crate::middleware::Trace;
use crate::test_support::InMemoryUserRepository;

const KNOWN_ID: &str = "65f1c0de00000000000000ab";

fn test_app(
    repository: Arc<dyn UserRepository>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::from_repository(repository)))
        .wrap(Trace)
        .configure(configure)
}

async fn send(
    repository: Arc<dyn UserRepository>,
    request: actix_test::TestRequest,
) -> (StatusCode, actix_web::web::Bytes) {
    let app = actix_test::init_service(test_app(repository)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    (status, actix_test::read_body(response).await)
}

fn error_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("error payload is JSON")
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_user() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let (status, body) = send(
        repo.clone(),
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": "A", "email": "a@x.com", "id": "ignored" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created: UserResponse = serde_json::from_slice(&body).expect("user JSON");
    assert_eq!(created.name, "A");
    assert_eq!(created.email, "a@x.com");
    assert_ne!(created.id, "ignored");
    assert_eq!(created.id.len(), 24);
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[case::not_json("{not json")]
#[case::missing_email(r#"{"name":"A"}"#)]
#[actix_web::test]
async fn undecodable_body_is_internal_error(#[case] payload: &'static str) {
    let (status, body) = send(
        Arc::new(InMemoryUserRepository::default()),
        actix_test::TestRequest::post()
            .uri("/user")
            .insert_header(("content-type", "application/json"))
            .set_payload(payload),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let text = std::str::from_utf8(&body).expect("utf8 body");
    assert!(text.starts_with("invalid request body: "), "got {text}");
}

#[rstest]
#[actix_web::test]
async fn body_without_content_type_is_still_decoded() {
    let (status, _) = send(
        Arc::new(InMemoryUserRepository::default()),
        actix_test::TestRequest::post()
            .uri("/user")
            .set_payload(r#"{"name":"A","email":"a@x.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[case(UserPersistenceError::connection("no servers"), "DB connection failed: no servers")]
#[case(UserPersistenceError::query("write concern"), "insert failed: write concern")]
#[actix_web::test]
async fn create_store_failures_are_plain_text(
    #[case] failure: UserPersistenceError,
    #[case] expected: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_insert().returning(move |_| Err(failure.clone()));

    let (status, body) = send(
        Arc::new(repo),
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": "A", "email": "a@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.as_ref(), expected.as_bytes());
}

#[rstest]
#[actix_web::test]
async fn list_is_empty_array_without_users() {
    let (status, body) = send(
        Arc::new(InMemoryUserRepository::default()),
        actix_test::TestRequest::get().uri("/user?limit=1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_ref(), b"[]");
}

#[rstest]
#[case(UserPersistenceError::decode("bad name"), "cursor decode failed: bad name")]
#[case(UserPersistenceError::timeout("5000ms"), "query failed: 5000ms")]
#[actix_web::test]
async fn list_store_failures_are_plain_text(
    #[case] failure: UserPersistenceError,
    #[case] expected: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_list().returning(move || Err(failure.clone()));

    let (status, body) = send(Arc::new(repo), actix_test::TestRequest::get().uri("/user")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.as_ref(), expected.as_bytes());
}

#[rstest]
#[case::no_slash("/user", "Missing ID in the URL")]
#[case::trailing_slash("/user/", "Missing ID in the URL")]
#[case::malformed("/user/not-a-valid-id", "Invalid ID format")]
#[case::short_hex("/user/65f1c0de", "Invalid ID format")]
#[actix_web::test]
async fn delete_rejects_missing_or_malformed_ids(#[case] uri: &str, #[case] message: &str) {
    let (status, body) = send(
        Arc::new(MockUserRepository::new()),
        actix_test::TestRequest::delete().uri(uri),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_body(&body), json!({ "error": 0, "message": message }));
}

#[rstest]
#[actix_web::test]
async fn delete_unknown_id_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .withf(|id| id.to_string() == KNOWN_ID)
        .times(1)
        .returning(|_| Ok(false));

    let (status, body) = send(
        Arc::new(repo),
        actix_test::TestRequest::delete().uri(&format!("/user/{KNOWN_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error_body(&body),
        json!({ "error": 1, "message": "User Not Found" })
    );
}

#[rstest]
#[actix_web::test]
async fn delete_existing_id_has_empty_body() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().times(1).returning(|_| Ok(true));

    let (status, body) = send(
        Arc::new(repo),
        actix_test::TestRequest::delete().uri(&format!("/user/{KNOWN_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[rstest]
#[actix_web::test]
async fn delete_store_failure_is_plain_text() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .returning(|_| Err(UserPersistenceError::query("not primary")));

    let (status, body) = send(
        Arc::new(repo),
        actix_test::TestRequest::delete().uri(&format!("/user/{KNOWN_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.as_ref(), b"deletion failed: not primary");
}

#[rstest]
#[actix_web::test]
async fn lookup_with_empty_name_is_rejected() {
    let (status, body) = send(
        Arc::new(MockUserRepository::new()),
        actix_test::TestRequest::get().uri("/user/"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_body(&body),
        json!({ "error": 0, "message": "missing username" })
    );
}

#[rstest]
#[actix_web::test]
async fn lookup_unknown_name_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_name()
        .withf(|name| name == "Grace")
        .returning(|_| Ok(None));

    let (status, body) = send(
        Arc::new(repo),
        actix_test::TestRequest::get().uri("/user/Grace"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error_body(&body),
        json!({ "error": 1, "message": "user not found" })
    );
}

#[rstest]
#[actix_web::test]
async fn lookup_decodes_percent_encoded_names() {
    let repo = Arc::new(InMemoryUserRepository::default());
    repo.insert(&NewUser::new("Ada Lovelace", "ada@example.com"))
        .await
        .expect("seed user");

    let (status, body) = send(
        repo,
        actix_test::TestRequest::get().uri("/user/Ada%20Lovelace"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let found: UserResponse = serde_json::from_slice(&body).expect("user JSON");
    assert_eq!(found.email, "ada@example.com");
}

#[rstest]
#[actix_web::test]
async fn error_responses_carry_trace_id() {
    let app = actix_test::init_service(test_app(Arc::new(MockUserRepository::new()))).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/user/not-a-valid-id")
            .to_request(),
    )
    .await;

    assert!(response.headers().contains_key("trace-id"));
}
