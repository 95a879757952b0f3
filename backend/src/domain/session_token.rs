//! Signed session tokens.
//!
//! Tokens are HS256 JWTs carrying the user id, an absolute expiry and the
//! fixed issuer [`TOKEN_ISSUER`]. Expiry is checked against the injected
//! clock with no leeway so tests can pin time.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::UserId;

/// Issuer claim written into and required from every token.
pub const TOKEN_ISSUER: &str = "CerealNotes";

/// Failures raised by [`SessionTokenCodec`].
///
/// Verification failures are deliberately indistinguishable from one another.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("invalid session token")]
    InvalidToken,
    #[error("failed to sign session token: {message}")]
    Signing { message: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: i64,
    exp: i64,
    iss: String,
}

/// Issues and verifies session tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl SessionTokenCodec {
    /// Build a codec around `secret`, reading the current time from `clock`.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_owned(), "iss".to_owned()]);
        validation.set_issuer(&[TOKEN_ISSUER]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    /// Sign a token for `user_id` that expires `ttl` from now.
    ///
    /// A `ttl` that pushes the expiry past the representable range is a
    /// [`TokenError::Signing`] failure.
    pub fn issue(&self, user_id: UserId, ttl: chrono::Duration) -> Result<String, TokenError> {
        let expires_at =
            self.clock
                .utc()
                .checked_add_signed(ttl)
                .ok_or_else(|| TokenError::Signing {
                    message: format!("token lifetime of {}s is out of range", ttl.num_seconds()),
                })?;
        let claims = Claims {
            user_id: user_id.get(),
            exp: expires_at.timestamp(),
            iss: TOKEN_ISSUER.to_owned(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(
            |err| TokenError::Signing {
                message: err.to_string(),
            },
        )
    }

    /// Verify `token` and return the user it was issued for.
    ///
    /// Surrounding whitespace is ignored. A token is valid only while its
    /// expiry is strictly in the future.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token.trim(), &self.decoding, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "session token rejected");
                TokenError::InvalidToken
            })?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            debug!("session token expired");
            return Err(TokenError::InvalidToken);
        }
        Ok(UserId::new(data.claims.user_id))
    }
}
