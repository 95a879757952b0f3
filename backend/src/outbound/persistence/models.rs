//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text, Timestamptz};

use crate::domain::{Note, NoteId, UserId, UserSummary};

use super::schema::{
    note_to_category_relationship, note_to_publication_relationship, notes, publications, users,
};

/// Columns of `users` exposed by the directory listing.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserListingRow {
    pub id: i64,
    pub display_name: String,
}

impl UserListingRow {
    pub(crate) fn into_entry(self) -> (UserId, UserSummary) {
        (
            UserId::new(self.id),
            UserSummary {
                display_name: self.display_name,
            },
        )
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub display_name: &'a str,
    pub email_address: &'a str,
    pub password: &'a [u8],
    pub creation_time: DateTime<Utc>,
}

/// Row struct for reading from the notes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NoteRow {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub creation_time: DateTime<Utc>,
}

impl NoteRow {
    pub(crate) fn into_entry(self) -> (NoteId, Note) {
        (
            NoteId::new(self.id),
            Note {
                author_id: UserId::new(self.author_id),
                content: self.content,
                creation_time: self.creation_time,
            },
        )
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notes)]
pub(crate) struct NewNoteRow<'a> {
    pub author_id: i64,
    pub content: &'a str,
    pub creation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = publications)]
pub(crate) struct NewPublicationRow {
    pub author_id: i64,
    pub creation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = note_to_publication_relationship)]
pub(crate) struct NotePublicationLinkRow {
    pub publication_id: i64,
    pub note_id: i64,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = note_to_category_relationship)]
pub(crate) struct NoteCategoryRow<'a> {
    pub note_id: i64,
    pub category: &'a str,
}

/// Result row of the published-note visibility query.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct RankedNoteRow {
    #[diesel(sql_type = BigInt)]
    pub issue_number: i64,
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub author_id: i64,
    #[diesel(sql_type = Text)]
    pub content: String,
    #[diesel(sql_type = Timestamptz)]
    pub creation_time: DateTime<Utc>,
}
