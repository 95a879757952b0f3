//! Session token and cookie configuration.
//!
//! Reads the token signing secret and the session cookie toggles from the
//! environment. Release builds insist on explicit, valid values; debug builds
//! fall back to defaults with a warning so local runs need no setup.

use std::path::PathBuf;

use actix_web::cookie::SameSite;
use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

mod parsing;

pub mod fingerprint;

use parsing::{BoolToggle, fallback_or_error, parse_same_site, read_bool_toggle};

const TOKEN_KEY_DEFAULT_PATH: &str = "/var/run/secrets/token_key";
const TOKEN_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "TOKEN_KEY_FILE";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Attributes applied to the session cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Strict,
        }
    }
}

/// Token signing secret plus cookie attributes.
pub struct TokenSettings {
    /// HMAC secret; wiped on drop.
    pub secret: Zeroizing<Vec<u8>>,
    pub cookie: CookieSettings,
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read token key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use cerealnotes::inbound::http::token_config::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("cerealnotes_token_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
///
/// let key_path = key_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///     "SESSION_SAMESITE" => Some("Strict".to_string()),
///     "TOKEN_ALLOW_EPHEMERAL" => Some("0".to_string()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie.secure);
/// assert_eq!(settings.secret.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let secure = read_bool_toggle(
        env,
        mode,
        BoolToggle {
            name: COOKIE_SECURE_ENV,
            fallback: true,
        },
    )?;
    let same_site = same_site_from_env(env, mode, secure)?;
    let allow_ephemeral = read_bool_toggle(
        env,
        mode,
        BoolToggle {
            name: ALLOW_EPHEMERAL_ENV,
            fallback: false,
        },
    )?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(TokenConfigError::EphemeralNotAllowed);
    }
    let secret = token_key_from_env(env, mode, allow_ephemeral)?;

    Ok(TokenSettings {
        secret,
        cookie: CookieSettings { secure, same_site },
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, TokenConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    match env.string(SAMESITE_ENV) {
        Some(raw) => parse_same_site(&raw, mode, cookie_secure, default_same_site),
        None => fallback_or_error(
            mode,
            default_same_site,
            TokenConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        ),
    }
}

fn ephemeral_key() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; TOKEN_KEY_MIN_LEN]);
    rand::thread_rng().fill_bytes(bytes.as_mut_slice());
    bytes
}

fn token_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| TOKEN_KEY_DEFAULT_PATH.to_string()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_KEY_MIN_LEN {
                return Err(TokenConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: TOKEN_KEY_MIN_LEN,
                });
            }
            Ok(bytes)
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token key (dev only); sessions end on restart"
                );
                Ok(ephemeral_key())
            } else {
                Err(TokenConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}
