//! Session cookie handling.
//!
//! The session is a signed token in the `CerealNotesToken` cookie. Handlers
//! that need a caller take an [`AuthenticatedUser`] argument; requests
//! without a valid token are answered with `401` and a `WWW-Authenticate`
//! challenge before the handler runs.

use actix_web::cookie::{Cookie, time};
use actix_web::http::StatusCode;
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, TRACE_ID_HEADER, UserId};

use super::state::HttpState;
use super::token_config::CookieSettings;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "CerealNotesToken";

/// Caller identity recovered from a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

/// Rejection for requests that lack a valid session.
#[derive(Debug, thiserror::Error)]
#[error("login required")]
pub struct SessionRequired {
    realm: String,
}

impl ResponseError for SessionRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        let body = Error::unauthorized(self.to_string());
        let mut builder = HttpResponse::Unauthorized();
        builder.insert_header((WWW_AUTHENTICATE, format!("Bearer realm=\"{}\"", self.realm)));
        if let Some(id) = body.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(body)
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        return Err(Error::internal("http state is not registered").into());
    };
    let challenge = || SessionRequired {
        realm: req.path().to_owned(),
    };
    let cookie = req.cookie(SESSION_COOKIE_NAME).ok_or_else(challenge)?;
    match state.tokens.verify(cookie.value()) {
        Ok(user_id) => Ok(AuthenticatedUser(user_id)),
        Err(err) => {
            debug!(path = req.path(), error = %err, "session cookie rejected");
            Err(challenge().into())
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Cookie carrying `token`, valid for `ttl`.
pub fn session_cookie(
    token: String,
    settings: CookieSettings,
    ttl: chrono::Duration,
) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME, token)
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .finish()
}

/// Cookie that instructs the browser to drop the session.
pub fn expired_session_cookie(settings: CookieSettings) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), settings, chrono::Duration::zero());
    cookie.make_removal();
    cookie
}
