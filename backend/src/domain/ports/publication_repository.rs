//! Port for publications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Publication, PublicationId, UserId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Insert a bare publication row.
    async fn insert_publication(
        &self,
        publication: &Publication,
    ) -> Result<PublicationId, PersistenceError>;

    /// Atomically create a publication stamped `now` holding every
    /// unpublished note of `author_id`.
    ///
    /// Returns the number of notes linked. Zero means there was nothing to
    /// publish and no publication row was written.
    async fn publish_unpublished(
        &self,
        author_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, PersistenceError>;
}
