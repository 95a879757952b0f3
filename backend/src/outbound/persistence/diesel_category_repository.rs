//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, PersistenceError};
use crate::domain::{Category, NoteId};

use super::diesel_helpers::{exactly_one, map_diesel_error, map_pool_error, with_timeout};
use super::models::NoteCategoryRow;
use super::pool::DbPool;
use super::schema::note_to_category_relationship as categories;

/// Diesel-backed implementation of the category repository port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn insert_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<(), PersistenceError> {
        with_timeout(self.pool.query_timeout(), "insert_category", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NoteCategoryRow {
                note_id: note_id.get(),
                category: category.as_str(),
            };
            diesel::insert_into(categories::table)
                .values(&row)
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn upsert_category(
        &self,
        note_id: NoteId,
        category: Category,
    ) -> Result<usize, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "upsert_category", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NoteCategoryRow {
                note_id: note_id.get(),
                category: category.as_str(),
            };
            diesel::insert_into(categories::table)
                .values(&row)
                .on_conflict(categories::note_id)
                .do_update()
                .set(categories::category.eq(excluded(categories::category)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn delete_category(&self, note_id: NoteId) -> Result<usize, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "delete_category", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::delete(categories::table.filter(categories::note_id.eq(note_id.get())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn category_for_note(&self, note_id: NoteId) -> Result<Category, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "category_for_note", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let names: Vec<String> = categories::table
                .filter(categories::note_id.eq(note_id.get()))
                .select(categories::category)
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            let name = exactly_one(names)?;
            name.parse::<Category>()
                .map_err(|err| PersistenceError::query(err.to_string()))
        })
        .await
    }
}
