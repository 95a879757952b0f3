//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.
//!
//! The published-note visibility query ranks each author's publications by
//! creation time (ties broken by id) and keeps the issues whose rank does
//! not exceed the number of publications the reader has made.

use async_trait::async_trait;
use diesel::dsl::{exists, not};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NoteRepository, PersistenceError};
use crate::domain::{IssueNumber, Note, NoteId, NoteMap, PublishedNotes, UserId};

use super::diesel_helpers::{exactly_one, map_diesel_error, map_pool_error, with_timeout};
use super::models::{NewNoteRow, NoteRow, RankedNoteRow};
use super::pool::DbPool;
use super::schema::{note_to_publication_relationship, notes};

const VISIBLE_PUBLISHED_NOTES_SQL: &str = r#"
WITH ranked AS (
    SELECT id,
           ROW_NUMBER() OVER (
               PARTITION BY author_id
               ORDER BY creation_time ASC, id ASC
           ) AS issue_number
    FROM publications
)
SELECT ranked.issue_number,
       notes.id,
       notes.author_id,
       notes.content,
       notes.creation_time
FROM ranked
JOIN note_to_publication_relationship AS link ON link.publication_id = ranked.id
JOIN notes ON notes.id = link.note_id
WHERE ranked.issue_number <= (
    SELECT COUNT(*) FROM publications WHERE author_id = $1
)
ORDER BY ranked.issue_number, notes.id
"#;

/// Diesel-backed implementation of the note repository port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn group_by_issue(rows: Vec<RankedNoteRow>) -> PublishedNotes {
    let mut published = PublishedNotes::new();
    for row in rows {
        let (id, note) = NoteRow {
            id: row.id,
            author_id: row.author_id,
            content: row.content,
            creation_time: row.creation_time,
        }
        .into_entry();
        published
            .entry(IssueNumber::new(row.issue_number))
            .or_default()
            .insert(id, note);
    }
    published
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn insert_note(&self, note: &Note) -> Result<NoteId, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "insert_note", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewNoteRow {
                author_id: note.author_id.get(),
                content: &note.content,
                creation_time: note.creation_time,
            };
            let ids: Vec<i64> = diesel::insert_into(notes::table)
                .values(&row)
                .returning(notes::id)
                .get_results(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            exactly_one(ids).map(NoteId::new)
        })
        .await
    }

    async fn notes_by_author(&self, author_id: &UserId) -> Result<NoteMap, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "notes_by_author", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<NoteRow> = notes::table
                .filter(notes::author_id.eq(author_id.get()))
                .select(NoteRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(NoteRow::into_entry).collect())
        })
        .await
    }

    async fn unpublished_notes_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<NoteMap, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "unpublished_notes_by_author", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<NoteRow> = notes::table
                .filter(notes::author_id.eq(author_id.get()))
                .filter(not(exists(
                    note_to_publication_relationship::table
                        .filter(note_to_publication_relationship::note_id.eq(notes::id)),
                )))
                .select(NoteRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(NoteRow::into_entry).collect())
        })
        .await
    }

    async fn published_notes_visible_to(
        &self,
        reader_id: &UserId,
    ) -> Result<PublishedNotes, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "published_notes_visible_to", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<RankedNoteRow> = diesel::sql_query(VISIBLE_PUBLISHED_NOTES_SQL)
                .bind::<BigInt, _>(reader_id.get())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(group_by_issue(rows))
        })
        .await
    }

    async fn note_by_id(&self, note_id: NoteId) -> Result<Note, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "note_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<NoteRow> = notes::table
                .filter(notes::id.eq(note_id.get()))
                .select(NoteRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            exactly_one(rows).map(|row| row.into_entry().1)
        })
        .await
    }

    async fn update_content(
        &self,
        note_id: NoteId,
        content: &str,
    ) -> Result<usize, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "update_note_content", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::update(notes::table.filter(notes::id.eq(note_id.get())))
                .set(notes::content.eq(content))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn delete_note(&self, note_id: NoteId) -> Result<usize, PersistenceError> {
        with_timeout(self.pool.query_timeout(), "delete_note", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::delete(notes::table.filter(notes::id.eq(note_id.get())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn ranked(issue_number: i64, id: i64, author_id: i64) -> RankedNoteRow {
        RankedNoteRow {
            issue_number,
            id,
            author_id,
            content: format!("note {id}"),
            creation_time: Utc
                .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn rows_are_grouped_by_issue_number() {
        let published = group_by_issue(vec![
            ranked(1, 10, 1),
            ranked(1, 20, 2),
            ranked(2, 11, 1),
        ]);

        assert_eq!(published.len(), 2);
        let first = &published[&IssueNumber::new(1)];
        assert_eq!(
            first.keys().copied().collect::<Vec<_>>(),
            vec![NoteId::new(10), NoteId::new(20)]
        );
        assert_eq!(first[&NoteId::new(20)].author_id, UserId::new(2));
        assert_eq!(published[&IssueNumber::new(2)].len(), 1);
    }

    #[rstest]
    fn no_rows_means_no_issues() {
        assert!(group_by_issue(Vec::new()).is_empty());
    }
}
