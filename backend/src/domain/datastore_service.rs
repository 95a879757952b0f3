//! Datastore service implementing the driving port.
//!
//! The service owns the rules that sit above raw storage: password hashing
//! and verification, collapsing every login failure into one error kind, the
//! single-row discipline for updates and deletes, and translating constraint
//! violations into the error kinds callers act on.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CategoryRepository, Datastore, NoteRepository, PersistenceError, PublicationRepository,
    UserRepository,
};
use crate::domain::{
    Category, DatastoreError, DisplayName, EmailAddress, Note, NoteId, NoteMap, PasswordHasher,
    Publication, PublicationId, PublishedNotes, UserId, UserMap,
};

/// Map an affected-row count onto the single-row contract of note and
/// category mutations.
pub(crate) fn expect_single_row_affected(affected: usize) -> Result<(), DatastoreError> {
    match affected {
        0 => Err(DatastoreError::NoteNotFound),
        1 => Ok(()),
        affected => Err(DatastoreError::TooManyRowsAffected { affected }),
    }
}

/// Production [`Datastore`] backed by repository ports.
#[derive(Clone)]
pub struct DatastoreService<U, N, C, P> {
    users: Arc<U>,
    notes: Arc<N>,
    categories: Arc<C>,
    publications: Arc<P>,
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
}

impl<U, N, C, P> DatastoreService<U, N, C, P> {
    /// Create a service over the given repositories.
    pub fn new(
        users: Arc<U>,
        notes: Arc<N>,
        categories: Arc<C>,
        publications: Arc<P>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            notes,
            categories,
            publications,
            clock,
            hasher: PasswordHasher::default(),
        }
    }

    /// Replace the password hasher, typically to lower the bcrypt cost in
    /// tests.
    pub fn with_password_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }
}

fn note_not_found_on_missing_row(err: PersistenceError) -> DatastoreError {
    match err {
        PersistenceError::NoRows | PersistenceError::MissingReference { .. } => {
            DatastoreError::NoteNotFound
        }
        other => other.into(),
    }
}

#[async_trait]
impl<U, N, C, P> Datastore for DatastoreService<U, N, C, P>
where
    U: UserRepository,
    N: NoteRepository,
    C: CategoryRepository,
    P: PublicationRepository,
{
    async fn authenticate_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<(), DatastoreError> {
        let stored = match self.users.password_hash_for_email(email).await {
            Ok(stored) => stored,
            Err(PersistenceError::NoRows) => {
                self.hasher.verify_absent(password).await;
                return Err(DatastoreError::CredentialsNotAuthorized);
            }
            Err(err) => return Err(err.into()),
        };
        match self.hasher.verify(password, &stored).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DatastoreError::CredentialsNotAuthorized),
            Err(err) => {
                debug!(error = %err, "stored password hash could not be checked");
                Err(DatastoreError::CredentialsNotAuthorized)
            }
        }
    }

    async fn user_id_for_email(&self, email: &EmailAddress) -> Result<UserId, DatastoreError> {
        self.users
            .user_id_for_email(email)
            .await
            .map_err(|err| match err {
                PersistenceError::NoRows => DatastoreError::CredentialsNotAuthorized,
                other => other.into(),
            })
    }

    async fn store_new_user(
        &self,
        display_name: &DisplayName,
        email: &EmailAddress,
        password: &str,
    ) -> Result<(), DatastoreError> {
        let hash = self
            .hasher
            .hash(password)
            .await
            .map_err(|err| DatastoreError::Storage {
                message: err.to_string(),
            })?;
        self.users
            .insert_user(display_name, email, &hash, self.clock.utc())
            .await
            .map_err(|err| match err {
                PersistenceError::UniqueViolation { .. } => DatastoreError::EmailAlreadyInUse,
                other => other.into(),
            })
    }

    async fn list_all_users(&self) -> Result<UserMap, DatastoreError> {
        Ok(self.users.list_users().await?)
    }

    async fn store_note_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<(), DatastoreError> {
        self.categories
            .insert_category(note_id, category)
            .await
            .map_err(|err| match err {
                PersistenceError::UniqueViolation { .. } => DatastoreError::CategoryAlreadyExists,
                PersistenceError::MissingReference { .. } => DatastoreError::NoteNotFound,
                other => other.into(),
            })
    }

    async fn update_note_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<(), DatastoreError> {
        let affected = self
            .categories
            .upsert_category(note_id, category)
            .await
            .map_err(note_not_found_on_missing_row)?;
        expect_single_row_affected(affected)
    }

    async fn delete_note_category(&self, note_id: NoteId) -> Result<(), DatastoreError> {
        let affected = self.categories.delete_category(note_id).await?;
        expect_single_row_affected(affected)
    }

    async fn note_category(&self, note_id: NoteId) -> Result<Category, DatastoreError> {
        self.categories
            .category_for_note(note_id)
            .await
            .map_err(|err| match err {
                PersistenceError::NoRows => DatastoreError::CategoryNotSet,
                other => other.into(),
            })
    }

    async fn notes_by_author(&self, author_id: &UserId) -> Result<NoteMap, DatastoreError> {
        Ok(self.notes.notes_by_author(author_id).await?)
    }

    async fn delete_note(&self, note_id: NoteId) -> Result<(), DatastoreError> {
        let affected = self.notes.delete_note(note_id).await?;
        expect_single_row_affected(affected)
    }

    async fn unpublished_notes_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<NoteMap, DatastoreError> {
        Ok(self.notes.unpublished_notes_by_author(author_id).await?)
    }

    async fn store_new_note(&self, note: &Note) -> Result<NoteId, DatastoreError> {
        Ok(self.notes.insert_note(note).await?)
    }

    async fn published_notes_visible_to(
        &self,
        reader_id: &UserId,
    ) -> Result<PublishedNotes, DatastoreError> {
        Ok(self.notes.published_notes_visible_to(reader_id).await?)
    }

    async fn note_by_id(&self, note_id: NoteId) -> Result<Note, DatastoreError> {
        self.notes
            .note_by_id(note_id)
            .await
            .map_err(note_not_found_on_missing_row)
    }

    async fn update_note_content(
        &self,
        note_id: NoteId,
        content: &str,
    ) -> Result<(), DatastoreError> {
        let affected = self.notes.update_content(note_id, content).await?;
        expect_single_row_affected(affected)
    }

    async fn publish_notes(&self, author_id: &UserId) -> Result<(), DatastoreError> {
        let linked = self
            .publications
            .publish_unpublished(author_id, self.clock.utc())
            .await?;
        if linked == 0 {
            return Err(DatastoreError::NoNotesToPublish);
        }
        info!(author_id = author_id.get(), notes = linked, "notes published");
        Ok(())
    }

    async fn store_new_publication(
        &self,
        publication: &Publication,
    ) -> Result<PublicationId, DatastoreError> {
        Ok(self.publications.insert_publication(publication).await?)
    }
}

#[cfg(test)]
#[path = "datastore_service_tests.rs"]
mod tests;
