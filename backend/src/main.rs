//! CerealNotes server entry point.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cerealnotes::inbound::http::health::HealthState;
use cerealnotes::inbound::http::token_config::{BuildMode, token_settings_from_env};
use cerealnotes::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use cerealnotes::settings::AppSettings;

use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings.database_url()?.to_owned();

    let migrations_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migrations_url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.db_max_connections()?)
            .with_connection_timeout(settings.db_connection_timeout())
            .with_query_timeout(settings.query_timeout()?),
    )
    .await
    .wrap_err("failed to build database pool")?;

    let token = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session token configuration")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(settings.bind_addr()?, pool, token, settings.token_ttl()?),
    )?;
    server.await?;
    Ok(())
}
