//! Domain ports for the hexagonal boundary.
//!
//! Repository ports are implemented by the Diesel adapters in
//! `outbound::persistence`; [`Datastore`] is the driving port implemented
//! by [`crate::domain::DatastoreService`] and consumed by the HTTP layer.

mod category_repository;
mod datastore;
mod note_repository;
mod persistence_error;
mod publication_repository;
mod user_repository;

pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use datastore::Datastore;
#[cfg(test)]
pub use datastore::MockDatastore;
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::NoteRepository;
pub use persistence_error::PersistenceError;
#[cfg(test)]
pub use publication_repository::MockPublicationRepository;
pub use publication_repository::PublicationRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
