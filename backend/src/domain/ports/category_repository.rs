//! Port for the per-note category table.

use async_trait::async_trait;

use crate::domain::{Category, NoteId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert-only write; an existing row is a
    /// [`PersistenceError::UniqueViolation`] and an unknown note a
    /// [`PersistenceError::MissingReference`].
    async fn insert_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<(), PersistenceError>;

    /// Insert or replace, returning the affected row count.
    async fn upsert_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<usize, PersistenceError>;

    async fn delete_category(&self, note_id: NoteId) -> Result<usize, PersistenceError>;

    /// Category of a note; [`PersistenceError::NoRows`] when none is set.
    async fn category_for_note(&self, note_id: NoteId) -> Result<Category, PersistenceError>;
}
