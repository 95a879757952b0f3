//! Note handlers.
//!
//! ```text
//! GET    /api/note
//! POST   /api/note          {"content":"…"}
//! PUT    /api/note?id=12    {"content":"…"}
//! DELETE /api/note?id=12
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Error, Note, NoteContent, NoteContentError, NoteId, NoteMap, PublishedNotes, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// `?id=` selector shared by the note and category endpoints.
#[derive(Debug, Deserialize)]
pub struct NoteQuery {
    pub id: i64,
}

impl NoteQuery {
    pub fn note_id(&self) -> NoteId {
        NoteId::new(self.id)
    }
}

/// Body for creating or editing a note.
#[derive(Debug, Deserialize, Serialize)]
pub struct NoteContentRequest {
    pub content: String,
}

/// Everything the caller may read.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NotesView {
    /// The caller's own notes that are not yet in any issue.
    pub unpublished: NoteMap,
    /// Visible issues of every author, keyed by issue number.
    pub published: PublishedNotes,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedNote {
    pub note_id: NoteId,
}

fn content_error(err: NoteContentError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "content", "code": "empty_content" }))
}

/// Fetch `note_id` and confirm `caller` wrote it.
///
/// Unknown notes are `404`; notes written by someone else are `403`.
pub(crate) async fn authored_note(
    state: &HttpState,
    note_id: NoteId,
    caller: UserId,
) -> ApiResult<Note> {
    let note = state.datastore.note_by_id(note_id).await?;
    if note.author_id != caller {
        return Err(Error::forbidden("only the author may change this note"));
    }
    Ok(note)
}

/// The caller's unpublished notes plus every issue they may read.
#[get("/note")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<NotesView>> {
    let unpublished = state
        .datastore
        .unpublished_notes_by_author(&user.id())
        .await?;
    let published = state.datastore.published_notes_visible_to(&user.id()).await?;
    Ok(web::Json(NotesView {
        unpublished,
        published,
    }))
}

#[post("/note")]
pub async fn create_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<NoteContentRequest>,
) -> ApiResult<HttpResponse> {
    let content = NoteContent::new(&payload.content).map_err(content_error)?;
    let note = Note::new(user.id(), content, state.clock.utc());
    let note_id = state.datastore.store_new_note(&note).await?;
    info!(note_id = note_id.get(), author_id = user.id().get(), "note created");
    Ok(HttpResponse::Created().json(CreatedNote { note_id }))
}

/// Replace the text of one of the caller's notes.
#[put("/note")]
pub async fn update_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<NoteQuery>,
    payload: web::Json<NoteContentRequest>,
) -> ApiResult<HttpResponse> {
    let content = NoteContent::new(&payload.content).map_err(content_error)?;
    let note_id = query.note_id();
    let note = authored_note(&state, note_id, user.id()).await?;
    if note.content == content.as_ref() {
        return Err(Error::invalid_request("note content is unchanged")
            .with_details(json!({ "field": "content", "code": "unchanged_content" })));
    }
    state
        .datastore
        .update_note_content(note_id, content.as_ref())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Delete one of the caller's notes together with its category and
/// publication link.
#[delete("/note")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<NoteQuery>,
) -> ApiResult<HttpResponse> {
    let note_id = query.note_id();
    let own_notes = state.datastore.notes_by_author(&user.id()).await?;
    if !own_notes.contains_key(&note_id) {
        return Err(Error::not_found("note not found"));
    }
    state.datastore.delete_note(note_id).await?;
    info!(note_id = note_id.get(), "note deleted");
    Ok(HttpResponse::Ok().finish())
}
