//! Practice Router

use std::sync::Arc;

use axum::{Router, routing::post};
use platform::sync::KeyedLocks;

use crate::application::config::PracticeConfig;
use crate::domain::generator::{GeneratedBatch, QuestionGenerator};
use crate::domain::repository::{ContentStore, PracticeSessionRepository};
use crate::infra::coalescer::GenerationCoalescer;
use crate::infra::http_generator::HttpQuestionGenerator;
use crate::infra::postgres::PgPracticeRepository;
use crate::presentation::handlers::{self, PracticeAppState};

/// Create the practice router with PostgreSQL repository and HTTP generator
///
/// Returns the router together with the coalescer handle so the binary can
/// drive the periodic cache sweep.
pub fn practice_router(
    repo: PgPracticeRepository,
    generator: HttpQuestionGenerator,
    config: PracticeConfig,
) -> (Router, Arc<GenerationCoalescer<GeneratedBatch>>) {
    practice_router_generic(repo, generator, config)
}

/// Create a generic practice router for any repository/generator implementation
pub fn practice_router_generic<R, G>(
    repo: R,
    generator: G,
    config: PracticeConfig,
) -> (Router, Arc<GenerationCoalescer<GeneratedBatch>>)
where
    R: PracticeSessionRepository + ContentStore + Clone + Send + Sync + 'static,
    G: QuestionGenerator + Send + Sync + 'static,
{
    let coalescer = Arc::new(GenerationCoalescer::new(config.cache_ttl, config.sweep_ttl));

    let state = PracticeAppState {
        repo: Arc::new(repo),
        generator: Arc::new(generator),
        coalescer: coalescer.clone(),
        locks: Arc::new(KeyedLocks::new()),
        config: Arc::new(config),
    };

    let router = Router::new()
        .route("/sessions", post(handlers::start_session::<R, G>))
        .route(
            "/sessions/{id}/next",
            post(handlers::next_questions::<R, G>),
        )
        .with_state(state);

    (router, coalescer)
}
