//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the [`Datastore`] port,
//! so tests can drive them with a mock.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;

use crate::domain::SessionTokenCodec;
use crate::domain::ports::Datastore;

use super::token_config::CookieSettings;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub datastore: Arc<dyn Datastore>,
    pub tokens: Arc<SessionTokenCodec>,
    pub clock: Arc<dyn Clock>,
    pub cookie: CookieSettings,
    /// Lifetime of issued session tokens and their cookie.
    pub token_ttl: Duration,
}

impl HttpState {
    /// Bundle the handler dependencies.
    pub fn new(
        datastore: Arc<dyn Datastore>,
        tokens: Arc<SessionTokenCodec>,
        clock: Arc<dyn Clock>,
        cookie: CookieSettings,
        token_ttl: Duration,
    ) -> Self {
        Self {
            datastore,
            tokens,
            clock,
            cookie,
            token_ttl,
        }
    }
}
