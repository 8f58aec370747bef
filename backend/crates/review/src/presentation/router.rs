//! Review Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::ReviewConfig;
use crate::domain::repository::CardRepository;
use crate::infra::postgres::PgReviewRepository;
use crate::presentation::handlers::{self, ReviewAppState};

/// Create the review router with PostgreSQL repository
pub fn review_router(repo: PgReviewRepository, config: ReviewConfig) -> Router {
    review_router_generic(repo, config)
}

/// Create a generic review router for any repository implementation
pub fn review_router_generic<R>(repo: R, config: ReviewConfig) -> Router
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let state = ReviewAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/cards", post(handlers::create_card::<R>))
        .route("/cards/{id}/review", post(handlers::review_card::<R>))
        .route("/due", get(handlers::due_cards::<R>))
        .with_state(state)
}
