//! Note categories.
//!
//! A note carries at most one category drawn from a closed, ordered list of
//! lower-case names. The position in that list is the category's index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const CATEGORY_NAMES: [&str; 4] = ["marginalia", "meta", "questions", "predictions"];

/// Name returned for an index outside the category list.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Category attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Marginalia,
    Meta,
    Questions,
    Predictions,
}

impl Category {
    /// Every category in list order.
    pub const ALL: [Self; 4] = [
        Self::Marginalia,
        Self::Meta,
        Self::Questions,
        Self::Predictions,
    ];

    /// Position of this category in the name list.
    pub const fn index(self) -> usize {
        match self {
            Self::Marginalia => 0,
            Self::Meta => 1,
            Self::Questions => 2,
            Self::Predictions => 3,
        }
    }

    /// Category at `index`, if there is one.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical lower-case name.
    pub fn as_str(self) -> &'static str {
        category_name(self.index())
    }
}

/// Name for the category at `index`, or [`UNKNOWN_CATEGORY`] when the index
/// is out of range.
///
/// # Examples
/// ```
/// use cerealnotes::domain::{category_name, UNKNOWN_CATEGORY};
///
/// assert_eq!(category_name(2), "questions");
/// assert_eq!(category_name(42), UNKNOWN_CATEGORY);
/// ```
pub fn category_name(index: usize) -> &'static str {
    CATEGORY_NAMES
        .get(index)
        .copied()
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// Raised when a string names no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{name}' does not correspond to a note category")]
pub struct UnknownCategory {
    pub name: String,
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match; callers lower-case user input first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORY_NAMES
            .iter()
            .position(|name| *name == s)
            .and_then(Self::from_index)
            .ok_or_else(|| UnknownCategory { name: s.to_owned() })
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
