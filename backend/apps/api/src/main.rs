//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router, http,
    http::{Method, header},
};
use practice::{HttpQuestionGenerator, PgPracticeRepository, PracticeConfig, practice_router};
use review::{PgReviewRepository, ReviewConfig, review_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,review=info,practice=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Upstream generation service
    let generator_url =
        env::var("GENERATOR_URL").expect("GENERATOR_URL must be set in environment");
    let generator_timeout = env::var("GENERATOR_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let generator =
        HttpQuestionGenerator::new(generator_url, Duration::from_secs(generator_timeout))?;

    let review_repo = PgReviewRepository::new(pool.clone());
    let practice_repo = PgPracticeRepository::new(pool.clone());

    let practice_config = PracticeConfig::default();
    let sweep_interval = practice_config.sweep_interval;

    let (practice_routes, coalescer) =
        practice_router(practice_repo, generator, practice_config);

    // Periodic sweep bounds the generation cache
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        // The first tick completes immediately; skip it
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = coalescer.sweep_expired();
            if removed > 0 {
                tracing::info!(
                    entries = removed,
                    "Swept expired generation cache entries"
                );
            }
        }
    });

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
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/review",
            review_router(review_repo, ReviewConfig::default()),
        )
        .nest("/api/practice", practice_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31117));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
