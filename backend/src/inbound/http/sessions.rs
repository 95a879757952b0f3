//! Login and logout handlers.
//!
//! ```text
//! POST   /api/session {"emailAddress":"alice@example.com","password":"…"}
//! DELETE /api/session
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::{CredentialsValidationError, Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{expired_session_cookie, session_cookie};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::credentials_error;

/// Login request body for `POST /api/session`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_address: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email_address, &value.password)
    }
}

/// Check credentials and set the session cookie.
#[post("/session")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(credentials_error)?;
    state
        .datastore
        .authenticate_credentials(credentials.email(), credentials.password())
        .await?;
    let user_id = state.datastore.user_id_for_email(credentials.email()).await?;
    let token = state.tokens.issue(user_id, state.token_ttl).map_err(|err| {
        error!(error = %err, "failed to sign session token");
        Error::internal("failed to create session")
    })?;
    info!(user_id = user_id.get(), "user logged in");
    Ok(HttpResponse::Created()
        .cookie(session_cookie(token, state.cookie, state.token_ttl))
        .finish())
}

/// Expire the session cookie. Always succeeds.
#[delete("/session")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(expired_session_cookie(state.cookie))
        .body("user successfully logged out")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDatastore;
    use crate::domain::{DatastoreError, UserId};
    use crate::inbound::http::session::SESSION_COOKIE_NAME;
    use crate::inbound::http::test_utils::test_state;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    fn login_body(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email_address: email.into(),
            password: password.into(),
        }
    }

    async fn call(
        datastore: MockDatastore,
        request: actix_test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let state = test_state(datastore);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api").service(login).service(logout)),
        )
        .await;
        actix_test::call_service(&app, request.to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn successful_login_sets_a_verifiable_cookie() {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_authenticate_credentials()
            .withf(|email, password| email.as_ref() == "alice@example.com" && password == "pw")
            .returning(|_, _| Ok(()));
        datastore
            .expect_user_id_for_email()
            .returning(|_| Ok(UserId::new(3)));

        let response = call(
            datastore,
            actix_test::TestRequest::post()
                .uri("/api/session")
                .set_json(login_body("ALICE@example.com", "pw")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie set");
        assert_eq!(cookie.http_only(), Some(true));
        let verifier = test_state(MockDatastore::new());
        assert_eq!(verifier.tokens.verify(cookie.value()), Ok(UserId::new(3)));
    }

    #[rstest]
    #[actix_web::test]
    async fn bad_credentials_are_unauthorised_without_cookie() {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_authenticate_credentials()
            .returning(|_, _| Err(DatastoreError::CredentialsNotAuthorized));
        datastore.expect_user_id_for_email().never();

        let response = call(
            datastore,
            actix_test::TestRequest::post()
                .uri("/api/session")
                .set_json(login_body("alice@example.com", "nope")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.response().cookies().next().is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn blank_password_is_rejected_before_lookup() {
        let mut datastore = MockDatastore::new();
        datastore.expect_authenticate_credentials().never();

        let response = call(
            datastore,
            actix_test::TestRequest::post()
                .uri("/api/session")
                .set_json(login_body("alice@example.com", "")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_expires_the_cookie() {
        let response = call(
            MockDatastore::new(),
            actix_test::TestRequest::delete().uri("/api/session"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("removal cookie set");
        assert_eq!(cookie.value(), "");
        assert_eq!(
            actix_test::read_body(response).await,
            "user successfully logged out"
        );
    }
}
