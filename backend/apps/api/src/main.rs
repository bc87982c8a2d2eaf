//! API Server Entry Point
//!
//! Reads configuration from the environment, connects to PostgreSQL and
//! serves the booking routes. Startup failures are `anyhow` errors; request
//! failures are rendered by the booking crate.

use anyhow::{Context, bail};
use axum::{
    Router, http,
    http::{Method, header},
};
use booking::{BookingConfig, PgBookingRepository, booking_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,booking=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Connected to database");

    let config = booking_config()?;

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    let app = Router::new()
        .merge(booking_router(PgBookingRepository::new(pool), config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let port = env_or("SERVER_PORT", DEFAULT_PORT)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the booking configuration
///
/// Debug builds fall back to the development config (random secret,
/// short-lived tokens) when `JWT_SECRET` is unset.
fn booking_config() -> anyhow::Result<BookingConfig> {
    let mut config = match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => BookingConfig {
            token_secret: secret.into_bytes(),
            ..BookingConfig::default()
        },
        _ if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random secret");
            BookingConfig::development()
        }
        _ => bail!("JWT_SECRET must be set in production"),
    };

    let ttl_hours = env_or("ACCESS_TOKEN_TTL_HOURS", config.access_token_ttl.num_hours())?;
    config.access_token_ttl = chrono::Duration::hours(ttl_hours);

    config.password_pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes);

    tracing::info!(?config, "Booking configuration loaded");

    Ok(config)
}

/// Parse an optional environment variable, falling back to `default`
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
