//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `email_address` is stored lower-cased and unique.
    users (id) {
        id -> Int8,
        display_name -> Text,
        email_address -> Text,
        /// bcrypt hash bytes.
        password -> Bytea,
        creation_time -> Timestamptz,
    }
}

diesel::table! {
    notes (id) {
        id -> Int8,
        author_id -> Int8,
        content -> Text,
        creation_time -> Timestamptz,
    }
}

diesel::table! {
    /// One row per publish action; issue numbers are derived, not stored.
    publications (id) {
        id -> Int8,
        author_id -> Int8,
        creation_time -> Timestamptz,
    }
}

diesel::table! {
    note_to_publication_relationship (publication_id, note_id) {
        publication_id -> Int8,
        /// Unique: a note belongs to at most one publication.
        note_id -> Int8,
    }
}

diesel::table! {
    note_to_category_relationship (note_id) {
        note_id -> Int8,
        category -> Text,
    }
}

diesel::joinable!(notes -> users (author_id));
diesel::joinable!(publications -> users (author_id));
diesel::joinable!(note_to_publication_relationship -> notes (note_id));
diesel::joinable!(note_to_publication_relationship -> publications (publication_id));
diesel::joinable!(note_to_category_relationship -> notes (note_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    notes,
    publications,
    note_to_publication_relationship,
    note_to_category_relationship,
);
