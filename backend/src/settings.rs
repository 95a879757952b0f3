//! Process settings loaded via OrthoConfig.
//!
//! Values come from `CEREALNOTES_*` environment variables, an optional
//! configuration file and command-line flags. Unset values fall back to the
//! defaults below.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Settings that shape the running server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CEREALNOTES")]
pub struct AppSettings {
    /// PostgreSQL connection URL. Required.
    pub database_url: Option<String>,
    /// Interface to listen on.
    pub bind_address: Option<String>,
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    pub db_connection_timeout_secs: Option<u64>,
    /// Deadline applied to every repository call.
    pub query_timeout_ms: Option<u64>,
    /// Lifetime of a session token.
    pub token_ttl_minutes: Option<i64>,
}

/// Raised when a required setting is absent or out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("CEREALNOTES_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}'")]
    InvalidBindAddress { value: String },
    #[error("{name} must be positive")]
    NotPositive { name: &'static str },
    #[error("{name} is out of range")]
    OutOfRange { name: &'static str },
}

impl AppSettings {
    /// The configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        let ip: IpAddr = raw.trim().parse().map_err(|_| SettingsError::InvalidBindAddress {
            value: raw.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        positive(
            "db_max_connections",
            self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
        )
    }

    pub fn db_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connection_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
        )
    }

    pub fn query_timeout(&self) -> Result<Duration, SettingsError> {
        positive(
            "query_timeout_ms",
            self.query_timeout_ms.unwrap_or(DEFAULT_QUERY_TIMEOUT_MS),
        )
        .map(Duration::from_millis)
    }

    pub fn token_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        let minutes = self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        if minutes <= 0 {
            return Err(SettingsError::NotPositive {
                name: "token_ttl_minutes",
            });
        }
        chrono::Duration::try_minutes(minutes).ok_or(SettingsError::OutOfRange {
            name: "token_ttl_minutes",
        })
    }
}

fn positive<T: PartialOrd + Default>(name: &'static str, value: T) -> Result<T, SettingsError> {
    if value > T::default() {
        Ok(value)
    } else {
        Err(SettingsError::NotPositive { name })
    }
}
