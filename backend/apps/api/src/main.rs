//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use platform::crypto;
use registration::{
    InMemoryRegistrationRepository, PgRegistrationRepository, RegistrationConfig,
    domain::repository::SessionRepository, registration_router,
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,registration=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = registration_config()?;

    // Without DATABASE_URL everything lives in memory (local development)
    let registration = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            // Startup cleanup; errors here should not prevent server startup
            let repo = PgRegistrationRepository::new(pool);
            if let Err(e) = repo.cleanup_expired().await {
                tracing::warn!(
                    error = %e,
                    "Auth session cleanup failed, continuing anyway"
                );
            }

            registration_router(repo, config)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            registration_router(InMemoryRegistrationRepository::new(), config)
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", registration)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Registration configuration from the environment
///
/// `SESSION_SECRET` (base64, 32 bytes) is required in release builds; debug
/// builds fall back to a random secret and an insecure cookie.
fn registration_config() -> anyhow::Result<RegistrationConfig> {
    let mut config = match env::var("SESSION_SECRET") {
        Ok(secret_b64) => {
            let secret_bytes = crypto::from_base64(secret_b64.trim())?;
            let secret: [u8; 32] = secret_bytes
                .as_slice()
                .try_into()
                .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))?;
            RegistrationConfig {
                session_secret: secret,
                ..RegistrationConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => RegistrationConfig::development(),
        Err(_) => anyhow::bail!("SESSION_SECRET must be set in production"),
    };

    if let Ok(secure) = env::var("COOKIE_SECURE") {
        config.cookie_secure = secure.trim().parse()?;
    }

    Ok(config)
}
