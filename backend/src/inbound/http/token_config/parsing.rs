//! Parsers for the boolean and SameSite environment toggles.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, TokenConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean toggle and the value debug builds fall back to.
pub(super) struct BoolToggle {
    pub(super) name: &'static str,
    pub(super) fallback: bool,
}

/// Read a boolean toggle. Missing or malformed values fall back with a
/// warning in debug builds and fail in release builds.
pub(super) fn read_bool_toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    toggle: BoolToggle,
) -> Result<bool, TokenConfigError> {
    let BoolToggle { name, fallback } = toggle;
    let Some(raw) = env.string(name) else {
        return fallback_or_error(mode, fallback, TokenConfigError::MissingEnv { name }, || {
            warn!(variable = name, fallback, "toggle not set; using fallback");
        });
    };

    if let Some(flag) = parse_bool(&raw) {
        return Ok(flag);
    }
    fallback_or_error(
        mode,
        fallback,
        TokenConfigError::InvalidEnv {
            name,
            value: raw.clone(),
            expected: BOOL_EXPECTED,
        },
        || warn!(variable = name, value = %raw, fallback, "invalid toggle; using fallback"),
    )
}

/// Debug builds log and use `fallback`; release builds return `error`.
pub(super) fn fallback_or_error<T>(
    mode: BuildMode,
    fallback: T,
    error: TokenConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, TokenConfigError> {
    match mode {
        BuildMode::Debug => {
            warn_fn();
            Ok(fallback)
        }
        BuildMode::Release => Err(error),
    }
}

/// Parse a `SESSION_SAMESITE` value. `None` is only accepted alongside a
/// secure cookie in release builds.
pub(super) fn parse_same_site(
    raw: &str,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, TokenConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => fallback_or_error(
            mode,
            SameSite::None,
            TokenConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => fallback_or_error(
            mode,
            fallback,
            TokenConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: raw.to_owned(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %raw, "invalid SESSION_SAMESITE; using fallback"),
        ),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(true))]
    #[case("Yes", Some(true))]
    #[case(" n ", Some(false))]
    #[case("FALSE", Some(false))]
    #[case("maybe", None)]
    #[case("", None)]
    fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }

    #[rstest]
    #[case("Strict", SameSite::Strict)]
    #[case("lax", SameSite::Lax)]
    #[case("NONE", SameSite::None)]
    fn parses_same_site_with_secure_cookie(#[case] raw: &str, #[case] expected: SameSite) {
        let parsed = parse_same_site(raw, BuildMode::Release, true, SameSite::Strict)
            .expect("valid value parses");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn insecure_none_only_passes_in_debug() {
        assert_eq!(
            parse_same_site("None", BuildMode::Debug, false, SameSite::Lax).expect("debug"),
            SameSite::None
        );
        assert!(matches!(
            parse_same_site("None", BuildMode::Release, false, SameSite::Strict),
            Err(TokenConfigError::InsecureSameSiteNone)
        ));
    }
}
