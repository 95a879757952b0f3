//! Port for user persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{DisplayName, EmailAddress, UserId, UserMap};

use super::PersistenceError;

/// User rows are written once on signup and never updated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A taken email surfaces as
    /// [`PersistenceError::UniqueViolation`].
    async fn insert_user(
        &self,
        display_name: &DisplayName,
        email: &EmailAddress,
        password_hash: &[u8],
        creation_time: DateTime<Utc>,
    ) -> Result<(), PersistenceError>;

    /// Stored bcrypt hash for `email`, or [`PersistenceError::NoRows`].
    async fn password_hash_for_email(&self, email: &EmailAddress)
    -> Result<Vec<u8>, PersistenceError>;

    /// Id of the user registered under `email`, or [`PersistenceError::NoRows`].
    async fn user_id_for_email(&self, email: &EmailAddress) -> Result<UserId, PersistenceError>;

    /// Every user with their display name.
    async fn list_users(&self) -> Result<UserMap, PersistenceError>;
}
