//! User registration and directory handlers.
//!
//! ```text
//! POST /api/user {"displayName":"Alice","emailAddress":"alice@example.com","password":"…"}
//! GET  /api/user
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{CredentialsValidationError, Error, SignupDetails, UserMap};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /api/user`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub display_name: String,
    pub email_address: String,
    pub password: String,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = CredentialsValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.display_name, &value.email_address, &value.password)
    }
}

/// `400` payload naming the offending field.
pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// Register a new user.
///
/// Answers `201` on success and `409` when the email is taken.
#[post("/user")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignupDetails::try_from(payload.into_inner()).map_err(credentials_error)?;
    state
        .datastore
        .store_new_user(details.display_name(), details.email(), details.password())
        .await?;
    info!(email = %details.email(), "user registered");
    Ok(HttpResponse::Created().json(json!({ "message": "user created" })))
}

/// List every registered user, keyed by id.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use cerealnotes::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[get("/user")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<UserMap>> {
    let users = state.datastore.list_all_users().await?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests;
