use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::models::{Profile, TokenPair};

// Cookie names are a literal contract shared with the identity service and any
// edge infrastructure in front of this gateway. Path scope is `/` for both.
pub const ACCESS_COOKIE: &str = "ktx_admin_access_token";
pub const REFRESH_COOKIE: &str = "ktx_admin_refresh_token";

/// SessionPhase
///
/// Explicit lifecycle for session resolution. Every request walks the same
/// one-way path: `Init -> Loading -> Ready(profile|none)`. There is no
/// module-level session state anywhere in the application.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// Nothing resolved yet.
    Init,
    /// Profile fetch in flight.
    Loading,
    /// Resolution finished. `None` covers missing cookies, invalid tokens and
    /// failed fetches alike; consumers render the unauthenticated view.
    Ready(Option<Profile>),
}

/// SessionContext
///
/// The per-request session object, passed down explicitly. Constructed by the
/// `CurrentUser` extractor; transitions are one-way.
#[derive(Debug, Clone)]
pub struct SessionContext {
    phase: SessionPhase,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Init,
        }
    }

    /// Marks the profile fetch as in flight.
    pub fn begin_fetch(&mut self) {
        self.phase = SessionPhase::Loading;
    }

    /// Finishes resolution. A `None` profile is a valid terminal state, not an
    /// error.
    pub fn resolve(&mut self, profile: Option<Profile>) {
        self.phase = SessionPhase::Ready(profile);
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The resolved profile, if any. An unresolved context yields `None`,
    /// so a consumer can never observe a half-built session.
    pub fn profile(&self) -> Option<&Profile> {
        match &self.phase {
            SessionPhase::Ready(profile) => profile.as_ref(),
            _ => None,
        }
    }

    pub fn into_profile(self) -> Option<Profile> {
        match self.phase {
            SessionPhase::Ready(profile) => profile,
            _ => None,
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

// --- Cookie Plumbing ---

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
}

/// issue_cookies
///
/// Persists a fresh token pair as the two session cookies. The cookies ride on
/// the same response as the post-login redirect, so the follow-up navigation is
/// guaranteed to observe them.
pub fn issue_cookies(jar: CookieJar, tokens: TokenPair) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, tokens.access_token))
        .add(session_cookie(REFRESH_COOKIE, tokens.refresh_token))
}

/// clear_cookies
///
/// Expires both session cookies (Max-Age 0). Called on logout regardless of
/// prior state; clearing an absent cookie is harmless.
pub fn clear_cookies(jar: CookieJar) -> CookieJar {
    jar.add(removal_cookie(ACCESS_COOKIE))
        .add(removal_cookie(REFRESH_COOKIE))
}
