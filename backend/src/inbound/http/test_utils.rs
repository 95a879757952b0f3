//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::MockDatastore;
use crate::domain::{SessionTokenCodec, UserId};

use super::session::session_cookie;
use super::state::HttpState;
use super::token_config::CookieSettings;

const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret-test-secret-test-secret-0000";

/// Clock pinned to a fixed instant.
pub struct FixtureClock {
    pub utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// The instant every HTTP test runs at.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26)
        .single()
        .expect("valid fixture timestamp")
}

/// Handler state around `datastore` with a fixed clock and test secret.
pub fn test_state(datastore: MockDatastore) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock {
        utc_now: fixture_now(),
    });
    HttpState::new(
        Arc::new(datastore),
        Arc::new(SessionTokenCodec::new(TEST_SECRET, clock.clone())),
        clock,
        CookieSettings {
            secure: false,
            same_site: actix_web::cookie::SameSite::Lax,
        },
        chrono::Duration::hours(1),
    )
}

/// Session cookie for `user_id`, valid against any [`test_state`].
pub fn issue_cookie(state: &HttpState, user_id: UserId) -> Cookie<'static> {
    let token = state
        .tokens
        .issue(user_id, state.token_ttl)
        .expect("token issues");
    session_cookie(token, state.cookie, state.token_ttl)
}
