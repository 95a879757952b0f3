//! User identity value objects.
//!
//! Users are created on signup and are immutable afterwards. The email
//! address is the login handle and is compared case-insensitively, so it is
//! normalised to lower case the moment it enters the domain.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Database identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors raised by user value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("email address must not be empty")]
    EmptyEmailAddress,
}

/// Email address in its normalised, lower-case form.
///
/// Normalisation is idempotent: `EmailAddress::new(a.as_ref())` equals `a`.
///
/// # Examples
/// ```
/// use cerealnotes::domain::EmailAddress;
///
/// let email = EmailAddress::new("Alice@Example.COM");
/// assert_eq!(email.as_ref(), "alice@example.com");
/// assert_eq!(email, EmailAddress::new("alice@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise `raw` into an email address.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_lowercase())
    }

    /// Normalise `raw`, rejecting blank input.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyEmailAddress);
        }
        Ok(Self::new(raw))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for EmailAddress {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public display name; trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory entry exposed by the user listing; carries no credential data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub display_name: String,
}

/// All users keyed by id, ordered for stable output.
pub type UserMap = BTreeMap<UserId, UserSummary>;

#[cfg(test)]
mod tests;
