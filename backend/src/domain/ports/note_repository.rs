//! Port for note persistence and the published-note visibility query.

use async_trait::async_trait;

use crate::domain::{Note, NoteId, NoteMap, PublishedNotes, UserId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note and return its new id.
    async fn insert_note(&self, note: &Note) -> Result<NoteId, PersistenceError>;

    async fn notes_by_author(&self, author_id: &UserId) -> Result<NoteMap, PersistenceError>;

    /// Notes by `author_id` that no publication links to.
    async fn unpublished_notes_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<NoteMap, PersistenceError>;

    /// Published notes of every author whose issue number does not exceed
    /// the number of publications `reader_id` has made, grouped by issue.
    async fn published_notes_visible_to(
        &self,
        reader_id: &UserId,
    ) -> Result<PublishedNotes, PersistenceError>;

    /// Single note lookup; [`PersistenceError::NoRows`] when absent.
    async fn note_by_id(&self, note_id: NoteId) -> Result<Note, PersistenceError>;

    /// Replace the content of a note, returning the affected row count.
    async fn update_content(&self, note_id: NoteId, content: &str)
    -> Result<usize, PersistenceError>;

    /// Delete a note, returning the affected row count.
    async fn delete_note(&self, note_id: NoteId) -> Result<usize, PersistenceError>;
}
