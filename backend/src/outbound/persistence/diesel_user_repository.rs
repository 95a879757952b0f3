//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, UserRepository};
use crate::domain::{DisplayName, EmailAddress, UserId, UserMap};

use super::diesel_helpers::{exactly_one, map_diesel_error, map_pool_error, with_timeout};
use super::models::{NewUserRow, UserListingRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_user(
        &self,
        display_name: &DisplayName,
        email: &EmailAddress,
        password_hash: &[u8],
        creation_time: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        with_timeout(self.pool.query_timeout(), "insert_user", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewUserRow {
                display_name: display_name.as_ref(),
                email_address: email.as_ref(),
                password: password_hash,
                creation_time,
            };
            diesel::insert_into(users::table)
                .values(&row)
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn password_hash_for_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<u8>, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "password_hash_for_email", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let hashes: Vec<Vec<u8>> = users::table
                .filter(users::email_address.eq(email.as_ref()))
                .select(users::password)
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            exactly_one(hashes)
        })
        .await
    }

    async fn user_id_for_email(&self, email: &EmailAddress) -> Result<UserId, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "user_id_for_email", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let ids: Vec<i64> = users::table
                .filter(users::email_address.eq(email.as_ref()))
                .select(users::id)
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            exactly_one(ids).map(UserId::new)
        })
        .await
    }

    async fn list_users(&self) -> Result<UserMap, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "list_users", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<UserListingRow> = users::table
                .select(UserListingRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(UserListingRow::into_entry).collect())
        })
        .await
    }
}
