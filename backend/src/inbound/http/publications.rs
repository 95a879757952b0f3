//! Publishing handler.
//!
//! ```text
//! POST /api/publication
//! ```

use actix_web::{HttpResponse, post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Publish all of the caller's unpublished notes as their next issue.
///
/// `409` when there is nothing to publish.
#[post("/publication")]
pub async fn publish(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    state.datastore.publish_notes(&user.id()).await?;
    Ok(HttpResponse::Created().finish())
}
