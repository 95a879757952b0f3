//! Tests for user handlers.

use super::*;
use crate::domain::ports::MockDatastore;
use crate::domain::{DatastoreError, DisplayName, EmailAddress, UserId, UserSummary};
use crate::inbound::http::test_utils::{issue_cookie, test_state};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

fn signup_body(display_name: &str, email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        display_name: display_name.into(),
        email_address: email.into(),
        password: password.into(),
    }
}

async fn post_signup(datastore: MockDatastore, body: SignupRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(test_state(datastore)))
            .service(web::scope("/api").service(signup)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/user")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let value = actix_test::read_body_json(response).await;
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn signup_stores_normalised_email() {
    let mut datastore = MockDatastore::new();
    datastore
        .expect_store_new_user()
        .withf(|name, email, password| {
            name.as_ref() == "Alice"
                && email.as_ref() == "alice@example.com"
                && password == "correct horse"
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let (status, _) = post_signup(
        datastore,
        signup_body(" Alice ", "Alice@Example.COM", "correct horse"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let mut datastore = MockDatastore::new();
    datastore
        .expect_store_new_user()
        .returning(|_, _, _| Err(DatastoreError::EmailAlreadyInUse));

    let (status, body) =
        post_signup(datastore, signup_body("Alice", "alice@example.com", "pw")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case(signup_body("  ", "a@b.c", "pw"), "displayName", "empty_display_name")]
#[case(signup_body("Alice", " ", "pw"), "emailAddress", "empty_email_address")]
#[case(signup_body("Alice", "a@b.c", ""), "password", "empty_password")]
#[case(
    signup_body("Alice", "a@b.c", &"p".repeat(73)),
    "password",
    "password_too_long"
)]
#[actix_web::test]
async fn invalid_fields_are_rejected(
    #[case] body: SignupRequest,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut datastore = MockDatastore::new();
    datastore.expect_store_new_user().never();

    let (status, value) = post_signup(datastore, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn listing_users_requires_a_session() {
    let mut datastore = MockDatastore::new();
    datastore.expect_list_all_users().never();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(test_state(datastore)))
            .service(web::scope("/api").service(list_users)),
    )
    .await;

    let request = actix_test::TestRequest::get().uri("/api/user").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn listing_users_returns_display_names_by_id() {
    let mut datastore = MockDatastore::new();
    datastore.expect_list_all_users().returning(|| {
        Ok(UserMap::from([(
            UserId::new(7),
            UserSummary {
                display_name: "Alice".into(),
            },
        )]))
    });
    let state = test_state(datastore);
    let cookie = issue_cookie(&state, UserId::new(7));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").service(list_users)),
    )
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/user")
        .cookie(cookie)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, serde_json::json!({ "7": { "displayName": "Alice" } }));
}

#[rstest]
fn signup_request_converts_into_validated_details() {
    let details = SignupDetails::try_from(signup_body("Bob", "BOB@x.io", "pw")).expect("valid");
    assert_eq!(details.display_name(), &DisplayName::new("Bob").expect("name"));
    assert_eq!(details.email(), &EmailAddress::new("bob@x.io"));
}
