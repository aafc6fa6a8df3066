use ktx_console::{
    AppState, HttpIdentityClient, StubIdentityService,
    config::{AppConfig, Env},
    create_router,
    identity::IdentityState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for initializing
/// all core components: Configuration, Logging, the Identity client, and the
/// HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing Production secrets.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment variable,
    // falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ktx_console=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on the APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during local debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    if config.enforce_role_gate {
        tracing::info!("Role gate enforcement is ON");
    }

    // 4. Identity Service Selection
    // Local development runs against the in-process stub (profile resolves to
    // none); production talks to the real identity service over HTTP.
    let identity: IdentityState = match config.env {
        Env::Local => Arc::new(StubIdentityService::new(&config.jwt_secret)),
        Env::Production => Arc::new(HttpIdentityClient::new(&config.identity_base_url)),
    };

    // 5. Unified State Assembly
    let app_state = AppState {
        identity,
        config: config.clone(),
    };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("FATAL: failed to bind listener");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {}", config.bind_addr);

    // The long-running Axum server process.
    axum::serve(listener, app).await.unwrap();
}
