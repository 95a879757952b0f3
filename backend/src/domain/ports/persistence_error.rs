//! Error type shared by every repository port.

/// Failures raised by the persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// A connection could not be obtained or was lost mid-statement.
    #[error("database connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("database query failed: {message}")]
    Query { message: String },
    /// A unique constraint rejected the write.
    #[error("unique constraint {constraint} violated")]
    UniqueViolation { constraint: String },
    /// A foreign key pointed at a row that does not exist.
    #[error("foreign key constraint {constraint} violated")]
    MissingReference { constraint: String },
    /// A single-row read found nothing.
    #[error("no rows in result set")]
    NoRows,
    /// A single-row read found more than one row.
    #[error("multiple rows in result set")]
    MultipleRows,
    /// The statement did not finish within the configured timeout.
    #[error("database call timed out after {timeout_ms} ms")]
    TimedOut { timeout_ms: u64 },
}

impl PersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }

    pub fn missing_reference(constraint: impl Into<String>) -> Self {
        Self::MissingReference {
            constraint: constraint.into(),
        }
    }

    pub const fn no_rows() -> Self {
        Self::NoRows
    }

    pub const fn multiple_rows() -> Self {
        Self::MultipleRows
    }

    pub fn timed_out(timeout_ms: impl Into<u64>) -> Self {
        Self::TimedOut {
            timeout_ms: timeout_ms.into(),
        }
    }
}
