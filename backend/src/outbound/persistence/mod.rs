//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and a shared `bb8` pool.
//!
//! - Diesel row structs (`models.rs`) and the schema (`schema.rs`) are
//!   internal and never reach the domain.
//! - Every call runs under the pool's query timeout and maps failures onto
//!   [`crate::domain::ports::PersistenceError`].
//!
//! # Example
//!
//! ```ignore
//! use cerealnotes::outbound::persistence::{DbPool, DieselNoteRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cerealnotes")).await?;
//! let notes = DieselNoteRepository::new(pool.clone());
//! ```

pub(crate) mod diesel_helpers;
mod diesel_category_repository;
mod diesel_note_repository;
mod diesel_publication_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_note_repository::DieselNoteRepository;
pub use diesel_publication_repository::DieselPublicationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
