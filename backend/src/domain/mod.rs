//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, plus the `Datastore` service that enforces the
//! note, publication and category rules on top of the repository ports.
//!
//! Public surface:
//! - Identity value objects: [`UserId`], [`NoteId`], [`PublicationId`],
//!   [`IssueNumber`], [`EmailAddress`], [`DisplayName`], [`Category`].
//! - [`Error`] / [`ErrorCode`]: transport-agnostic API error payload.
//! - [`DatastoreError`]: closed error kinds returned by the datastore port.
//! - [`DatastoreService`]: the production implementation of
//!   [`ports::Datastore`].
//! - [`SessionTokenCodec`]: issues and verifies signed session tokens.

pub mod auth;
pub mod category;
pub mod datastore_error;
pub mod datastore_service;
pub mod error;
pub mod note;
pub mod password;
pub mod ports;
pub mod publication;
pub mod session_token;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, SignupDetails, CredentialsValidationError};
pub use self::category::{Category, UNKNOWN_CATEGORY, UnknownCategory, category_name};
pub use self::datastore_error::DatastoreError;
pub use self::datastore_service::DatastoreService;
pub use self::error::{Error, ErrorCode};
pub use self::note::{Note, NoteContent, NoteContentError, NoteId, NoteMap};
pub use self::password::{MAX_PASSWORD_BYTES, PasswordHashError, PasswordHasher};
pub use self::publication::{IssueNumber, Publication, PublicationId, PublishedNotes};
pub use self::session_token::{SessionTokenCodec, TOKEN_ISSUER, TokenError};
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, EmailAddress, UserId, UserMap, UserSummary, UserValidationError};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
