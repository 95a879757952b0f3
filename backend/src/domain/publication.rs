//! Publications and issue numbers.
//!
//! Publishing moves every unpublished note of an author into a new
//! publication. An author's publications are ranked by creation time and the
//! 1-based rank is the issue number readers see.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NoteMap, UserId};

/// Database identifier of a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationId(i64);

impl PublicationId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-author rank of a publication, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(i64);

impl IssueNumber {
    /// Wrap a rank produced by the ranking query.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw rank.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A publication row before it has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub author_id: UserId,
    pub creation_time: DateTime<Utc>,
}

/// Published notes grouped by issue number.
pub type PublishedNotes = BTreeMap<IssueNumber, NoteMap>;
