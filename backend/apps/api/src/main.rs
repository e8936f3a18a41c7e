//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request errors go through
//! `kernel::error::AppError`.

use anyhow::Context;
use auth::domain::repository::{TransactionManager, UserRepository};
use auth::domain::value_object::user_role::UserRole;
use auth::presentation::ACCESS_TOKEN_HEADER;
use auth::{AuthConfig, PgStore, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use qa::qa_router;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,qa=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = AuthConfig::from_env().context("PASSWORD_PEPPER must be base64")?;
    if auth_config.pepper().is_none() {
        tracing::warn!("PASSWORD_PEPPER not set, hashing passwords without a pepper");
    }

    // Errors here should not prevent server startup
    if let Err(e) = report_admins(&pool).await {
        tracing::warn!(error = %e, "Admin check failed, continuing anyway");
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .expose_headers(ExposeHeaders::list([ACCESS_TOKEN_HEADER]));

    let store = PgStore::new(pool);
    let app = Router::new()
        .merge(auth_router(store.clone(), auth_config))
        .merge(qa_router(store))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = env::var("API_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("API_BIND_ADDR must be host:port")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Admins are only created by promoting a user in the database
async fn report_admins(pool: &PgPool) -> anyhow::Result<()> {
    let mut tx = PgStore::new(pool.clone()).begin().await?;
    let admins = tx.find_users_by_role(UserRole::Admin).await?;

    if admins.is_empty() {
        tracing::warn!("No admin users; admin-only routes will reject every caller");
    } else {
        tracing::info!(admins = admins.len(), "Admin users present");
    }
    Ok(())
}
