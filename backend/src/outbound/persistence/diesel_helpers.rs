//! Shared helpers for the Diesel repositories.
//!
//! - translating pool and Diesel failures into [`PersistenceError`]
//! - the "exactly one row" check for single-row reads
//! - the per-call timeout wrapper

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

const UNKNOWN_CONSTRAINT: &str = "unknown";

/// Map pool errors to connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to persistence errors.
///
/// Constraint violations keep the constraint name so callers can tell which
/// rule rejected the write.
pub(crate) fn map_diesel_error(error: DieselError) -> PersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PersistenceError::no_rows(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PersistenceError::unique_violation(
                info.constraint_name().unwrap_or(UNKNOWN_CONSTRAINT),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            PersistenceError::missing_reference(
                info.constraint_name().unwrap_or(UNKNOWN_CONSTRAINT),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => PersistenceError::query(info.message()),
        DieselError::QueryBuilderError(_) => PersistenceError::query("database query error"),
        other => PersistenceError::query(other.to_string()),
    }
}

/// True when PostgreSQL aborted a serializable transaction that may succeed
/// on retry.
pub(crate) fn is_serialization_failure(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _)
    )
}

/// Take the single row of a result set.
///
/// Zero rows and more than one row are both errors; the first row is never
/// picked silently.
pub(crate) fn exactly_one<T>(rows: Vec<T>) -> Result<T, PersistenceError> {
    let mut rows = rows.into_iter();
    match (rows.next(), rows.next()) {
        (Some(row), None) => Ok(row),
        (None, _) => Err(PersistenceError::no_rows()),
        (Some(_), Some(_)) => Err(PersistenceError::multiple_rows()),
    }
}

/// Run `operation` under `timeout`, mapping expiry to
/// [`PersistenceError::TimedOut`].
pub(crate) async fn with_timeout<T, F>(
    timeout: Duration,
    operation: &'static str,
    future: F,
) -> Result<T, PersistenceError>
where
    F: Future<Output = Result<T, PersistenceError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(operation, timeout_ms, "database call timed out");
            Err(PersistenceError::timed_out(timeout_ms))
        }
    }
}
