//! Signup and login input validation.
//!
//! HTTP payloads are converted into these types before reaching the
//! datastore so blank fields are rejected at the edge. Passwords are held in
//! [`Zeroizing`] buffers and wiped when the value is dropped.

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress, MAX_PASSWORD_BYTES, UserValidationError};

/// Field-level validation failures for signup and login payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("email address must not be empty")]
    EmptyEmailAddress,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at most 72 bytes")]
    PasswordTooLong,
}

impl CredentialsValidationError {
    /// JSON field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyDisplayName => "displayName",
            Self::EmptyEmailAddress => "emailAddress",
            Self::EmptyPassword | Self::PasswordTooLong => "password",
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyDisplayName => "empty_display_name",
            Self::EmptyEmailAddress => "empty_email_address",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooLong => "password_too_long",
        }
    }
}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyDisplayName => Self::EmptyDisplayName,
            UserValidationError::EmptyEmailAddress => Self::EmptyEmailAddress,
        }
    }
}

fn non_empty_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// New passwords must also fit bcrypt's input without truncation.
fn hashable_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    let password = non_empty_password(password)?;
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CredentialsValidationError::PasswordTooLong);
    }
    Ok(password)
}

/// Validated login request.
///
/// # Examples
/// ```
/// use cerealnotes::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Alice@Example.com", "secret123")
///     .expect("valid credentials");
/// assert_eq!(creds.email().as_ref(), "alice@example.com");
/// assert_eq!(creds.password(), "secret123");
/// ```
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login fields.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: EmailAddress::parse(email)?,
            password: non_empty_password(password)?,
        })
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup request.
#[derive(Debug, Clone)]
pub struct SignupDetails {
    display_name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Validate raw signup fields.
    pub fn try_from_parts(
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            display_name: DisplayName::new(display_name)?,
            email: EmailAddress::parse(email)?,
            password: hashable_password(password)?,
        })
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
