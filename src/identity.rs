use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    auth,
    models::{LoginRequest, Profile, TokenPair},
};

// 1. IdentityService Contract
/// IdentityService
///
/// Defines the abstract contract for all interactions with the external
/// identity/profile service. This trait allows us to swap the concrete
/// implementation—from the real HTTP client (HttpIdentityClient) in production
/// to the in-process stub (StubIdentityService) during local development and
/// testing—without affecting the calling handlers.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Authenticates the given credentials against the identity service and
    /// returns the token pair to persist as session cookies.
    async fn login(&self, credentials: &LoginRequest) -> Result<TokenPair, String>;

    /// Resolves the profile (identity + role) behind an access token.
    ///
    /// Returns `Ok(None)` when the token is recognized but maps to no profile;
    /// `Err` covers transport and service failures. Callers degrade both to the
    /// unauthenticated view.
    async fn fetch_profile(&self, access_token: &str) -> Result<Option<Profile>, String>;
}

/// IdentityState
///
/// The concrete type used to share the identity service access across the
/// application state.
pub type IdentityState = Arc<dyn IdentityService>;

// 2. The Real Implementation (Remote Identity Service)
/// HttpIdentityClient
///
/// The concrete implementation backed by the remote identity service over HTTP.
/// Login posts credentials to `/auth/login`; profile resolution sends the
/// access token as a Bearer credential to `/auth/profile`.
#[derive(Clone)]
pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpIdentityClient {
    /// Constructs the client against the base URL from AppConfig.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl IdentityService for HttpIdentityClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<TokenPair, String> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(credentials)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("identity service rejected login: {}", response.status()));
        }

        response.json::<TokenPair>().await.map_err(|e| e.to_string())
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Option<Profile>, String> {
        let response = self
            .http
            .get(format!("{}/auth/profile", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        // A rejected token is "no profile", not a transport error: the UI
        // degrades to the unauthenticated view instead of failing the request.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(format!("identity service error: {}", response.status()));
        }

        response
            .json::<Profile>()
            .await
            .map(Some)
            .map_err(|e| e.to_string())
    }
}

// 3. The Stub Implementation (Local Development & Tests)
/// StubIdentityService
///
/// In-process stand-in for the identity service, used in `Env::Local` and in
/// tests. Login mints a real signed token pair with the local secret, so the
/// full cookie/gate flow works end to end without the remote service.
///
/// The profile defaults to `None`: a local run renders the unauthenticated
/// view (no chrome) until a profile is configured via `with_profile`.
#[derive(Clone)]
pub struct StubIdentityService {
    jwt_secret: String,
    profile: Option<Profile>,
}

impl StubIdentityService {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            jwt_secret: jwt_secret.to_string(),
            profile: None,
        }
    }

    /// Configures the stub to resolve every fetch with the given profile.
    pub fn with_profile(jwt_secret: &str, profile: Profile) -> Self {
        Self {
            jwt_secret: jwt_secret.to_string(),
            profile: Some(profile),
        }
    }
}

#[async_trait]
impl IdentityService for StubIdentityService {
    async fn login(&self, _credentials: &LoginRequest) -> Result<TokenPair, String> {
        // Any credentials pass; the subject is either the configured profile's
        // id or a throwaway.
        let sub = self.profile.as_ref().map(|p| p.id).unwrap_or_else(Uuid::new_v4);
        Ok(TokenPair {
            access_token: auth::issue_token(sub, &self.jwt_secret, 3600),
            refresh_token: auth::issue_token(sub, &self.jwt_secret, 86400),
        })
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<Option<Profile>, String> {
        Ok(self.profile.clone())
    }
}
