//! Notes and note content.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Database identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note as stored; the id is the key of the surrounding [`NoteMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub author_id: UserId,
    pub content: String,
    pub creation_time: DateTime<Utc>,
}

impl Note {
    /// Build a note authored by `author_id` at `creation_time`.
    pub fn new(author_id: UserId, content: NoteContent, creation_time: DateTime<Utc>) -> Self {
        Self {
            author_id,
            content: content.into(),
            creation_time,
        }
    }
}

/// Notes keyed by id.
pub type NoteMap = BTreeMap<NoteId, Note>;

/// Rejection reasons for user-supplied note content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NoteContentError {
    #[error("note content cannot be empty or just whitespace")]
    Empty,
}

/// Trimmed, non-blank note text accepted from clients.
///
/// # Examples
/// ```
/// use cerealnotes::domain::NoteContent;
///
/// let content = NoteContent::new("  hello world \n").expect("valid content");
/// assert_eq!(content.as_ref(), "hello world");
/// assert!(NoteContent::new(" \t ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent(String);

impl NoteContent {
    /// Trim `raw` and reject it when nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, NoteContentError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NoteContentError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for NoteContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NoteContent> for String {
    fn from(value: NoteContent) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("hello", "hello")]
    #[case("  padded  ", "padded")]
    #[case("line one\nline two\n", "line one\nline two")]
    fn content_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        let content = NoteContent::new(raw).expect("valid content");
        assert_eq!(content.as_ref(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn blank_content_is_rejected(#[case] raw: &str) {
        assert_eq!(NoteContent::new(raw), Err(NoteContentError::Empty));
    }

    #[rstest]
    fn note_serialises_in_camel_case() {
        let created = Utc
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let note = Note::new(
            UserId::new(3),
            NoteContent::new("hello").expect("content"),
            created,
        );
        let mut notes = NoteMap::new();
        notes.insert(NoteId::new(11), note);

        let value = serde_json::to_value(&notes).expect("serialise notes");
        assert_eq!(
            value,
            serde_json::json!({
                "11": {
                    "authorId": 3,
                    "content": "hello",
                    "creationTime": "2025-03-01T12:00:00Z",
                }
            })
        );
    }
}
