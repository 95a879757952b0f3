//! Driving port consumed by the HTTP adapter.
//!
//! Each operation maps one-to-one onto a user-visible action and reports
//! failures as a closed [`DatastoreError`].

use async_trait::async_trait;

use crate::domain::{
    Category, DatastoreError, DisplayName, EmailAddress, Note, NoteId, NoteMap, Publication,
    PublicationId, PublishedNotes, UserId, UserMap,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Succeeds only when `email` is registered and `password` matches.
    /// Unknown email and wrong password are indistinguishable.
    async fn authenticate_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<(), DatastoreError>;

    async fn user_id_for_email(&self, email: &EmailAddress) -> Result<UserId, DatastoreError>;

    /// Register a user, hashing `password` with bcrypt.
    async fn store_new_user(
        &self,
        display_name: &DisplayName,
        email: &EmailAddress,
        password: &str,
    ) -> Result<(), DatastoreError>;

    async fn list_all_users(&self) -> Result<UserMap, DatastoreError>;

    /// Attach a category to a note that has none.
    async fn store_note_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<(), DatastoreError>;

    /// Set or replace the category of a note.
    async fn update_note_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<(), DatastoreError>;

    async fn delete_note_category(&self, note_id: NoteId) -> Result<(), DatastoreError>;

    async fn note_category(&self, note_id: NoteId) -> Result<Category, DatastoreError>;

    async fn notes_by_author(&self, author_id: &UserId) -> Result<NoteMap, DatastoreError>;

    async fn delete_note(&self, note_id: NoteId) -> Result<(), DatastoreError>;

    async fn unpublished_notes_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<NoteMap, DatastoreError>;

    async fn store_new_note(&self, note: &Note) -> Result<NoteId, DatastoreError>;

    /// Published notes `reader_id` may see, grouped by issue number.
    async fn published_notes_visible_to(
        &self,
        reader_id: &UserId,
    ) -> Result<PublishedNotes, DatastoreError>;

    async fn note_by_id(&self, note_id: NoteId) -> Result<Note, DatastoreError>;

    async fn update_note_content(&self, note_id: NoteId, content: &str)
    -> Result<(), DatastoreError>;

    /// Publish every unpublished note of `author_id` as one new issue.
    async fn publish_notes(&self, author_id: &UserId) -> Result<(), DatastoreError>;

    async fn store_new_publication(
        &self,
        publication: &Publication,
    ) -> Result<PublicationId, DatastoreError>;
}
