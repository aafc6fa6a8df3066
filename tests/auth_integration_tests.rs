use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, header, request::Parts},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use ktx_console::{
    AppState,
    auth::{Claims, CurrentUser, Role, SessionEvidence, validate_token},
    config::AppConfig,
    identity::{IdentityService, StubIdentityService},
    models::{LoginRequest, Profile, TokenPair},
    session::{SessionContext, SessionPhase},
};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

// --- Helpers ---

fn create_token(user_id: Uuid, exp_offset: i64) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn test_profile(role: Role) -> Profile {
    Profile {
        id: TEST_USER_ID,
        email: "quan-tri@ktx.edu.vn".to_string(),
        role,
    }
}

fn create_app_state(identity: Arc<dyn IdentityService>) -> AppState {
    let mut config = AppConfig::default();
    config.jwt_secret = TEST_JWT_SECRET.to_string();
    AppState { identity, config }
}

/// Helper to get the mutable Parts struct from a generated Request, optionally
/// carrying the access-token cookie.
fn request_parts(cookie: Option<&str>) -> Parts {
    let mut builder = Request::builder()
        .method(Method::GET)
        .uri("/".parse::<Uri>().unwrap());
    if let Some(token) = cookie {
        builder = builder.header(
            header::COOKIE,
            format!("ktx_admin_access_token={token}"),
        );
    }
    let request = builder.body(axum::body::Body::empty()).unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- Mock Identity for Failure Paths ---

struct FailingIdentity;

#[async_trait]
impl IdentityService for FailingIdentity {
    async fn login(&self, _credentials: &LoginRequest) -> Result<TokenPair, String> {
        Err("identity service unavailable".to_string())
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<Option<Profile>, String> {
        Err("identity service unavailable".to_string())
    }
}

// --- Token Validation ---

#[test]
fn valid_token_passes_validation() {
    let token = create_token(TEST_USER_ID, 3600);
    let claims = validate_token(&token, TEST_JWT_SECRET).expect("token should validate");
    assert_eq!(claims.sub, TEST_USER_ID);
}

#[test]
fn expired_token_fails_validation() {
    let token = create_token(TEST_USER_ID, -3600);
    assert!(validate_token(&token, TEST_JWT_SECRET).is_none());
}

#[test]
fn token_signed_with_wrong_secret_fails_validation() {
    let token = create_token(TEST_USER_ID, 3600);
    assert!(validate_token(&token, "some-other-secret").is_none());
}

#[test]
fn garbage_token_fails_validation() {
    assert!(validate_token("not.a.jwt", TEST_JWT_SECRET).is_none());
}

// --- Session Evidence ---

#[test]
fn session_evidence_matrix() {
    use axum_extra::extract::cookie::CookieJar;
    use ktx_console::auth::session_evidence;

    let mut config = AppConfig::default();
    config.jwt_secret = TEST_JWT_SECRET.to_string();

    let no_cookie = CookieJar::from_headers(&request_parts(None).headers);
    assert_eq!(session_evidence(&no_cookie, &config), SessionEvidence::Missing);

    let expired = create_token(TEST_USER_ID, -3600);
    let bad = CookieJar::from_headers(&request_parts(Some(&expired)).headers);
    assert_eq!(session_evidence(&bad, &config), SessionEvidence::Invalid);

    let fresh = create_token(TEST_USER_ID, 3600);
    let good = CookieJar::from_headers(&request_parts(Some(&fresh)).headers);
    assert_eq!(session_evidence(&good, &config), SessionEvidence::Valid);
}

// --- CurrentUser Extractor ---

#[tokio::test]
async fn extractor_resolves_profile_with_valid_cookie() {
    let identity = Arc::new(StubIdentityService::with_profile(
        TEST_JWT_SECRET,
        test_profile(Role::Admin),
    ));
    let state = create_app_state(identity);

    let token = create_token(TEST_USER_ID, 3600);
    let mut parts = request_parts(Some(&token));

    let CurrentUser(profile) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    let profile = profile.expect("profile should resolve");
    assert_eq!(profile.id, TEST_USER_ID);
    assert_eq!(profile.role, Role::Admin);
}

#[tokio::test]
async fn extractor_degrades_to_none_without_cookie() {
    let identity = Arc::new(StubIdentityService::with_profile(
        TEST_JWT_SECRET,
        test_profile(Role::Admin),
    ));
    let state = create_app_state(identity);

    let mut parts = request_parts(None);
    let CurrentUser(profile) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn extractor_degrades_to_none_with_expired_token() {
    let identity = Arc::new(StubIdentityService::with_profile(
        TEST_JWT_SECRET,
        test_profile(Role::Admin),
    ));
    let state = create_app_state(identity);

    let token = create_token(TEST_USER_ID, -3600);
    let mut parts = request_parts(Some(&token));
    let CurrentUser(profile) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn extractor_degrades_to_none_when_profile_fetch_fails() {
    // A failing identity service must never surface as an error; the page
    // renders the unauthenticated view instead.
    let state = create_app_state(Arc::new(FailingIdentity));

    let token = create_token(TEST_USER_ID, 3600);
    let mut parts = request_parts(Some(&token));
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;
    let CurrentUser(profile) = result.unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn stubbed_identity_resolves_to_none_by_default() {
    // A bare stub resolves every fetch to no profile.
    let state = create_app_state(Arc::new(StubIdentityService::new(TEST_JWT_SECRET)));

    let token = create_token(TEST_USER_ID, 3600);
    let mut parts = request_parts(Some(&token));
    let CurrentUser(profile) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn extractor_reuses_a_session_cached_in_the_extensions() {
    // When a middleware has already resolved the session, the extractor must
    // return the cached value without touching the identity service. The
    // failing service proves no second fetch happens.
    let state = create_app_state(Arc::new(FailingIdentity));

    let token = create_token(TEST_USER_ID, 3600);
    let mut parts = request_parts(Some(&token));
    parts
        .extensions
        .insert(CurrentUser(Some(test_profile(Role::SuperAdmin))));

    let CurrentUser(profile) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    let profile = profile.expect("cached profile should be reused");
    assert_eq!(profile.role, Role::SuperAdmin);
}

// --- Session Lifecycle ---

#[test]
fn session_context_walks_init_loading_ready() {
    let mut ctx = SessionContext::new();
    assert_eq!(*ctx.phase(), SessionPhase::Init);
    assert!(ctx.profile().is_none());

    ctx.begin_fetch();
    assert_eq!(*ctx.phase(), SessionPhase::Loading);
    // A half-built session never exposes a profile.
    assert!(ctx.profile().is_none());

    let profile = test_profile(Role::Student);
    ctx.resolve(Some(profile.clone()));
    assert_eq!(*ctx.phase(), SessionPhase::Ready(Some(profile.clone())));
    assert_eq!(ctx.profile(), Some(&profile));
    assert_eq!(ctx.into_profile(), Some(profile));
}

#[test]
fn session_context_ready_with_no_profile_is_terminal() {
    let mut ctx = SessionContext::new();
    ctx.begin_fetch();
    ctx.resolve(None);
    assert_eq!(*ctx.phase(), SessionPhase::Ready(None));
    assert!(ctx.into_profile().is_none());
}
