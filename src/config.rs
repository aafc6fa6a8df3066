use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services
/// (e.g., the Identity client and the redirect gate). It is pulled into the
/// application state via FromRef, embodying the "immutable AppConfig" part of the
/// Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Runtime environment marker. Controls feature activation (e.g., the local
    // stubbed identity service).
    pub env: Env,
    // Address the HTTP server binds to.
    pub bind_addr: String,
    // Secret key used to decode and validate the access-token cookie (JWT).
    pub jwt_secret: String,
    // Base URL of the external identity/profile service.
    pub identity_base_url: String,
    // Role-gate enforcement toggle. Off by default: admin pages render for any
    // session and the layout simply omits the admin chrome. Switching it on
    // redirects non-admin profiles away from admin pages.
    pub enforce_role_gate: bool,
}

/// Env
///
/// Defines the runtime context, used to switch between development utilities
/// (stubbed identity, pretty logs) and production-grade infrastructure
/// (remote identity service, JSON logs).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set
    /// environment variables for lightweight unit or integration testing.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "0.0.0.0:3000".to_string(),
            jwt_secret: "super-secure-test-secret-value-local".to_string(),
            identity_base_url: "http://localhost:4000".to_string(),
            enforce_role_gate: false,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the
    /// **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the
    /// application from starting with an incomplete or insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // JWT Secret Resolution
        // The production secret is mandatory and must be explicitly set.
        let jwt_secret = match env {
            Env::Production => env::var("KTX_JWT_SECRET")
                .expect("FATAL: KTX_JWT_SECRET must be set in production."),
            // In local, we provide a fallback so the stubbed login flow works
            // out of the box.
            _ => env::var("KTX_JWT_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Role-gate enforcement. Defaults to off.
        let enforce_role_gate = env::var("ROLE_GATE_ENFORCE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "on"))
            .unwrap_or(false);

        match env {
            Env::Local => Self {
                env: Env::Local,
                bind_addr,
                jwt_secret,
                // Local runs against the stubbed identity service; the URL is
                // only consulted if IDENTITY_URL explicitly points elsewhere.
                identity_base_url: env::var("IDENTITY_URL")
                    .unwrap_or_else(|_| "http://localhost:4000".to_string()),
                enforce_role_gate,
            },
            Env::Production => Self {
                env: Env::Production,
                bind_addr,
                jwt_secret,
                // Production demands an explicit identity-service endpoint.
                identity_base_url: env::var("IDENTITY_URL")
                    .expect("FATAL: IDENTITY_URL required in prod"),
                enforce_role_gate,
            },
        }
    }
}
