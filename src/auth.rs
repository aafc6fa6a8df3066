use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    identity::IdentityState,
    models::Profile,
    session::{self, ACCESS_COOKIE},
};

/// Role
///
/// The single enumerated role type consumed everywhere. All authorization
/// decisions go through `is_admin` rather than ad hoc string comparisons
/// scattered across handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SuperAdmin,
    Student,
}

impl Role {
    /// Parses the wire representation of a role. Unknown values resolve to
    /// `None`, which downstream layers treat as "no navigation, no chrome".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    /// The single authorization-decision predicate: both `admin` and
    /// `super_admin` see the admin console chrome and menu.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::Student => "student",
        }
    }
}

/// Claims
///
/// Represents the standard payload structure expected inside the access-token
/// cookie (a JWT). These claims are signed by the identity service's secret and
/// validated on every request by the redirect gate.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): The UUID of the operator, matching `Profile::id`.
    pub sub: Uuid,
    /// Expiration Time (exp): Timestamp after which the token must not be accepted.
    pub exp: usize,
    /// Issued At (iat): Timestamp when the token was issued.
    pub iat: usize,
}

/// issue_token
///
/// Signs a fresh access token for `sub`, valid for `ttl_secs`. Used by the
/// local stubbed identity service and by test setup; production tokens are
/// minted by the external identity service with the same secret.
pub fn issue_token(sub: Uuid, secret: &str, ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub,
        iat: now as usize,
        exp: (now + ttl_secs) as usize,
    };
    let key = EncodingKey::from_secret(secret.as_bytes());
    // Signing with a symmetric key and default header cannot fail.
    encode(&Header::default(), &claims, &key).expect("HS256 signing failed")
}

/// validate_token
///
/// Decodes and validates the access token: signature and expiry, not merely
/// cookie presence. An expired or forged cookie of the right name must not
/// pass the gate.
pub fn validate_token(token: &str, secret: &str) -> Option<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    // Ensure expiration time validation is always active.
    validation.validate_exp = true;

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            match e.kind() {
                // Token expired: the most common failure for a valid-but-old cookie.
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("access token expired");
                }
                // All other failure types (bad signature, malformed token, etc.).
                other => {
                    tracing::debug!(kind = ?other, "access token rejected");
                }
            }
            None
        }
    }
}

/// SessionEvidence
///
/// What the current request proves about its session, derived once per request
/// from the access-token cookie. The redirect gate consumes this instead of a
/// raw "has cookie" boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvidence {
    /// No access-token cookie on the request.
    Missing,
    /// Cookie present but the token fails signature or expiry validation.
    /// Treated like `Missing` on protected paths, but does NOT trigger the
    /// redirect-away-from-login rule.
    Invalid,
    /// Cookie present and the token validated.
    Valid,
}

/// session_evidence
///
/// Derives the request's `SessionEvidence` from its cookie jar.
pub fn session_evidence(jar: &CookieJar, config: &AppConfig) -> SessionEvidence {
    match jar.get(ACCESS_COOKIE).map(Cookie::value) {
        None => SessionEvidence::Missing,
        Some(token) if token.is_empty() => SessionEvidence::Missing,
        Some(token) => match validate_token(token, &config.jwt_secret) {
            Some(_) => SessionEvidence::Valid,
            None => SessionEvidence::Invalid,
        },
    }
}

/// CurrentUser Extractor
///
/// The resolved operator profile for the current request, or `None` when the
/// request carries no usable session. Unlike a classic auth extractor this one
/// **never rejects**: a missing cookie, an invalid token, or a failed profile
/// fetch all degrade to `CurrentUser(None)`, which the layout renders as the
/// unauthenticated view (no sidebar, no nav) rather than an error page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Profile>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    // Allows the extractor to pull the identity service from the app state.
    IdentityState: FromRef<S>,
    // Allows the extractor to pull the AppConfig (for the JWT secret).
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A gate middleware may already have resolved the session for this
        // request and cached it in the extensions; reuse it instead of
        // validating the token and fetching the profile a second time.
        if let Some(cached) = parts.extensions.get::<CurrentUser>() {
            return Ok(cached.clone());
        }

        let identity = IdentityState::from_ref(state);
        let config = AppConfig::from_ref(state);

        // Explicit session lifecycle: init -> loading -> ready(profile|none).
        let mut ctx = session::SessionContext::new();

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(ACCESS_COOKIE).map(|c| c.value().to_owned()) else {
            ctx.resolve(None);
            return Ok(CurrentUser(ctx.into_profile()));
        };

        // Token must survive signature/expiry validation before we spend a
        // round-trip on the profile fetch.
        if validate_token(&token, &config.jwt_secret).is_none() {
            ctx.resolve(None);
            return Ok(CurrentUser(ctx.into_profile()));
        }

        ctx.begin_fetch();
        let profile = match identity.fetch_profile(&token).await {
            Ok(profile) => profile,
            Err(e) => {
                // Profile-fetch failure degrades silently to the
                // unauthenticated-looking view; it is never surfaced as an error.
                tracing::warn!(error = %e, "profile fetch failed, degrading to no profile");
                None
            }
        };
        ctx.resolve(profile);

        Ok(CurrentUser(ctx.into_profile()))
    }
}
