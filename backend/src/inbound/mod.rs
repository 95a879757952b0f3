//! Inbound adapters translating external requests into datastore calls.

pub mod http;
