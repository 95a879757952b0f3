//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;

use cerealnotes::Trace;
use cerealnotes::domain::ports::Datastore;
use cerealnotes::domain::{DatastoreService, SessionTokenCodec};
use cerealnotes::inbound::http::configure_api;
use cerealnotes::inbound::http::health::{HealthState, live, ready};
use cerealnotes::inbound::http::state::HttpState;
use cerealnotes::inbound::http::token_config::fingerprint::secret_fingerprint;
use cerealnotes::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselNoteRepository, DieselPublicationRepository,
    DieselUserRepository,
};

fn build_datastore(pool: &DbPool, clock: Arc<dyn Clock>) -> Arc<dyn Datastore> {
    Arc::new(DatastoreService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselNoteRepository::new(pool.clone())),
        Arc::new(DieselCategoryRepository::new(pool.clone())),
        Arc::new(DieselPublicationRepository::new(pool.clone())),
        clock,
    ))
}

fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let secret = config.token.secret.as_slice();
    info!(
        fingerprint = %secret_fingerprint(secret),
        "session token key loaded"
    );
    let tokens = SessionTokenCodec::new(secret, clock.clone());
    HttpState::new(
        build_datastore(&config.db_pool, clock.clone()),
        Arc::new(tokens),
        clock,
        config.token.cookie,
        config.token_ttl,
    )
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live)
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let bind_addr = config.bind_addr;
    // Zeroises the raw key bytes.
    drop(config);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
