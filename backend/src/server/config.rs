//! Inputs needed to start the HTTP server.

use std::net::SocketAddr;

use cerealnotes::inbound::http::token_config::TokenSettings;
use cerealnotes::outbound::persistence::DbPool;

/// Everything [`create_server`](super::create_server) consumes.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) token: TokenSettings,
    pub(crate) token_ttl: chrono::Duration,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        db_pool: DbPool,
        token: TokenSettings,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            bind_addr,
            db_pool,
            token,
            token_ttl,
        }
    }
}
