//! CerealNotes backend library.
//!
//! Layout follows ports and adapters: [`domain`] holds the value objects, the
//! repository ports and the `Datastore` service; [`outbound`] implements the
//! ports with Diesel on PostgreSQL; [`inbound`] exposes them over HTTP.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
