//! Closed error kinds returned by the [`Datastore`](super::ports::Datastore)
//! port and their mapping onto API errors.

use super::ports::PersistenceError;
use super::Error;

/// Every failure a datastore operation can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatastoreError {
    #[error("email address already in use")]
    EmailAlreadyInUse,
    #[error("credentials not authorized")]
    CredentialsNotAuthorized,
    #[error("note not found")]
    NoteNotFound,
    #[error("note has no category")]
    CategoryNotSet,
    #[error("note already has a category")]
    CategoryAlreadyExists,
    #[error("no notes to publish")]
    NoNotesToPublish,
    #[error("expected one row, found none")]
    NoRows,
    #[error("expected one row, found several")]
    MultipleRows,
    #[error("expected one affected row, found {affected}")]
    TooManyRowsAffected { affected: usize },
    #[error("datastore unavailable: {message}")]
    Unavailable { message: String },
    #[error("datastore failure: {message}")]
    Storage { message: String },
}

impl From<PersistenceError> for DatastoreError {
    fn from(value: PersistenceError) -> Self {
        match value {
            PersistenceError::NoRows => Self::NoRows,
            PersistenceError::MultipleRows => Self::MultipleRows,
            err @ (PersistenceError::Connection { .. } | PersistenceError::TimedOut { .. }) => {
                Self::Unavailable {
                    message: err.to_string(),
                }
            }
            err @ (PersistenceError::Query { .. }
            | PersistenceError::UniqueViolation { .. }
            | PersistenceError::MissingReference { .. }) => Self::Storage {
                message: err.to_string(),
            },
        }
    }
}

impl From<DatastoreError> for Error {
    fn from(value: DatastoreError) -> Self {
        match value {
            DatastoreError::CredentialsNotAuthorized => Error::unauthorized(value.to_string()),
            DatastoreError::NoteNotFound | DatastoreError::CategoryNotSet => {
                Error::not_found(value.to_string())
            }
            DatastoreError::EmailAlreadyInUse
            | DatastoreError::CategoryAlreadyExists
            | DatastoreError::NoNotesToPublish => Error::conflict(value.to_string()),
            DatastoreError::Unavailable { .. } => Error::service_unavailable(value.to_string()),
            DatastoreError::NoRows
            | DatastoreError::MultipleRows
            | DatastoreError::TooManyRowsAffected { .. }
            | DatastoreError::Storage { .. } => Error::internal(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(DatastoreError::CredentialsNotAuthorized, ErrorCode::Unauthorized)]
    #[case(DatastoreError::NoteNotFound, ErrorCode::NotFound)]
    #[case(DatastoreError::CategoryNotSet, ErrorCode::NotFound)]
    #[case(DatastoreError::EmailAlreadyInUse, ErrorCode::Conflict)]
    #[case(DatastoreError::CategoryAlreadyExists, ErrorCode::Conflict)]
    #[case(DatastoreError::NoNotesToPublish, ErrorCode::Conflict)]
    #[case(DatastoreError::NoRows, ErrorCode::InternalError)]
    #[case(DatastoreError::MultipleRows, ErrorCode::InternalError)]
    #[case(DatastoreError::TooManyRowsAffected { affected: 2 }, ErrorCode::InternalError)]
    #[case(DatastoreError::Storage { message: "boom".into() }, ErrorCode::InternalError)]
    #[case(
        DatastoreError::Unavailable { message: "down".into() },
        ErrorCode::ServiceUnavailable
    )]
    fn maps_to_api_error_codes(#[case] err: DatastoreError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(err).code(), expected);
    }

    #[rstest]
    #[case(PersistenceError::connection("refused"), true)]
    #[case(PersistenceError::timed_out(10_u64), true)]
    #[case(PersistenceError::query("syntax"), false)]
    #[case(PersistenceError::unique_violation("k"), false)]
    fn connection_failures_become_unavailable(
        #[case] err: PersistenceError,
        #[case] unavailable: bool,
    ) {
        let mapped = DatastoreError::from(err);
        assert_eq!(
            matches!(mapped, DatastoreError::Unavailable { .. }),
            unavailable
        );
    }

    #[rstest]
    fn row_count_errors_pass_through() {
        assert_eq!(
            DatastoreError::from(PersistenceError::no_rows()),
            DatastoreError::NoRows
        );
        assert_eq!(
            DatastoreError::from(PersistenceError::multiple_rows()),
            DatastoreError::MultipleRows
        );
    }
}
