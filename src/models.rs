use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Role;

// --- Core Application Schemas ---

/// Profile
///
/// Represents the authenticated operator's identity as returned by the external
/// identity service. This is the single source of truth for role-derived
/// rendering decisions; it is never persisted by this application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    // Primary identifier, matching the `sub` claim of the access token.
    pub id: Uuid,
    // The operator's login identifier.
    pub email: String,
    // The RBAC field: 'admin', 'super_admin' or 'student'.
    pub role: Role,
}

/// TokenPair
///
/// The credential material returned by a successful remote login. Both values
/// are persisted as cookies (path `/`) and never stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Input payload for the login form (POST /dang-nhap).
/// Note: The password is only passed through to the external identity service and
/// never persisted or logged internally by this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
