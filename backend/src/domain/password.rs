//! Password hashing with bcrypt.
//!
//! bcrypt is CPU bound so both operations run on the blocking thread pool.
//! Hashes are stored as raw bytes; the bcrypt output is ASCII so it survives
//! the round trip unchanged.
//!
//! bcrypt only reads the first [`MAX_PASSWORD_BYTES`] bytes of its input, so
//! longer passwords are refused instead of being silently truncated.

use bcrypt::DEFAULT_COST;

/// Longest password bcrypt hashes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Failures raised while hashing or verifying a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    #[error("password must be at most 72 bytes")]
    TooLong,
    #[error("password hashing task failed: {message}")]
    Join { message: String },
}

impl PasswordHashError {
    fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    fn join(message: impl Into<String>) -> Self {
        Self::Join {
            message: message.into(),
        }
    }
}

/// bcrypt hasher with a configurable cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    /// Hasher using `cost` rounds.
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `password` with a fresh salt.
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are rejected with
    /// [`PasswordHashError::TooLong`].
    pub async fn hash(&self, password: &str) -> Result<Vec<u8>, PasswordHashError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordHashError::TooLong);
        }
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || {
            bcrypt::hash(password.as_bytes(), cost)
                .map(String::into_bytes)
                .map_err(|err| PasswordHashError::hash(err.to_string()))
        })
        .await
        .map_err(|err| PasswordHashError::join(err.to_string()))?
    }

    /// Check `password` against a stored hash.
    ///
    /// A hash that is not valid bcrypt output is reported as an error rather
    /// than a mismatch.
    pub async fn verify(&self, password: &str, stored: &[u8]) -> Result<bool, PasswordHashError> {
        let stored = std::str::from_utf8(stored)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .to_owned();
        let password = zeroize::Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || {
            bcrypt::verify(password.as_bytes(), &stored)
                .map_err(|err| PasswordHashError::hash(err.to_string()))
        })
        .await
        .map_err(|err| PasswordHashError::join(err.to_string()))?
    }

    /// Spend the work of one verification when no stored hash exists.
    ///
    /// Login for an unknown account calls this so its latency matches a
    /// wrong password for a known one.
    pub async fn verify_absent(&self, password: &str) {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let outcome = tokio::task::spawn_blocking(move || {
            let truncated = &password.as_bytes()[..password.len().min(MAX_PASSWORD_BYTES)];
            bcrypt::hash(truncated, cost).map(drop)
        })
        .await;
        if let Err(err) = outcome {
            tracing::warn!(error = %err, "placeholder password check failed");
        }
    }
}
