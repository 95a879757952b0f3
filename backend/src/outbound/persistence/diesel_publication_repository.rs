//! PostgreSQL-backed `PublicationRepository` implementation using Diesel ORM.
//!
//! Publishing runs in a single SERIALIZABLE transaction: read the author's
//! unpublished notes, insert the publication row, then link every note with
//! one multi-row insert. Concurrent publishes by the same author can abort
//! with a serialization failure; those attempts are retried a bounded number
//! of times.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{exists, not};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{PersistenceError, PublicationRepository};
use crate::domain::{Publication, PublicationId, UserId};

use super::diesel_helpers::{
    exactly_one, is_serialization_failure, map_diesel_error, map_pool_error, with_timeout,
};
use super::models::{NewPublicationRow, NotePublicationLinkRow};
use super::pool::DbPool;
use super::schema::{note_to_publication_relationship, notes, publications};

const MAX_PUBLISH_ATTEMPTS: u32 = 3;

/// Diesel-backed implementation of the publication repository port.
#[derive(Clone)]
pub struct DieselPublicationRepository {
    pool: DbPool,
}

impl DieselPublicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// A concurrent publish can also lose the race on the unique `note_id`
/// index instead of failing serialization; both are safe to retry.
fn is_retryable(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    is_serialization_failure(error)
        || matches!(
            error,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
        )
}

enum PublishFailure {
    Database(diesel::result::Error),
    Invariant(PersistenceError),
}

impl From<diesel::result::Error> for PublishFailure {
    fn from(value: diesel::result::Error) -> Self {
        Self::Database(value)
    }
}

impl From<PersistenceError> for PublishFailure {
    fn from(value: PersistenceError) -> Self {
        Self::Invariant(value)
    }
}

async fn publish_once(
    conn: &mut AsyncPgConnection,
    author_id: i64,
    now: DateTime<Utc>,
) -> Result<usize, PublishFailure> {
    conn.build_transaction()
        .serializable()
        .run(|conn| {
            async move {
                let note_ids: Vec<i64> = notes::table
                    .filter(notes::author_id.eq(author_id))
                    .filter(not(exists(
                        note_to_publication_relationship::table
                            .filter(note_to_publication_relationship::note_id.eq(notes::id)),
                    )))
                    .select(notes::id)
                    .order(notes::id.asc())
                    .load(conn)
                    .await?;

                if note_ids.is_empty() {
                    return Ok(0);
                }

                let publication_ids: Vec<i64> = diesel::insert_into(publications::table)
                    .values(&NewPublicationRow {
                        author_id,
                        creation_time: now,
                    })
                    .returning(publications::id)
                    .get_results(conn)
                    .await?;
                let publication_id = exactly_one(publication_ids)?;

                let links: Vec<NotePublicationLinkRow> = note_ids
                    .iter()
                    .map(|&note_id| NotePublicationLinkRow {
                        publication_id,
                        note_id,
                    })
                    .collect();
                let linked = diesel::insert_into(note_to_publication_relationship::table)
                    .values(&links)
                    .execute(conn)
                    .await?;

                if linked < 1 {
                    return Err(PublishFailure::Invariant(PersistenceError::query(
                        "publication created without linked notes",
                    )));
                }
                Ok(linked)
            }
            .scope_boxed()
        })
        .await
}

#[async_trait]
impl PublicationRepository for DieselPublicationRepository {
    async fn insert_publication(
        &self,
        publication: &Publication,
    ) -> Result<PublicationId, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "insert_publication", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let ids: Vec<i64> = diesel::insert_into(publications::table)
                .values(&NewPublicationRow {
                    author_id: publication.author_id.get(),
                    creation_time: publication.creation_time,
                })
                .returning(publications::id)
                .get_results(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            exactly_one(ids).map(PublicationId::new)
        })
        .await
    }

    async fn publish_unpublished(
        &self,
        author_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "publish_unpublished", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut attempt = 1;
            loop {
                match publish_once(&mut conn, author_id.get(), now).await {
                    Ok(linked) => return Ok(linked),
                    Err(PublishFailure::Database(err))
                        if is_retryable(&err) && attempt < MAX_PUBLISH_ATTEMPTS =>
                    {
                        debug!(
                            author_id = author_id.get(),
                            attempt, "publish transaction conflicted; retrying"
                        );
                        attempt += 1;
                    }
                    Err(PublishFailure::Database(err)) => return Err(map_diesel_error(err)),
                    Err(PublishFailure::Invariant(err)) => return Err(err),
                }
            }
        })
        .await
    }
}
