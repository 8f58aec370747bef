//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use kernel::id::{DocumentId, PracticeSessionId};
use platform::sync::KeyedLocks;
use uuid::Uuid;

use crate::application::config::PracticeConfig;
use crate::application::next_questions::{NextQuestionsInput, NextQuestionsUseCase};
use crate::application::start_session::{StartSessionInput, StartPracticeSessionUseCase};
use crate::domain::generator::{GeneratedBatch, QuestionGenerator};
use crate::domain::repository::{ContentStore, PracticeSessionRepository};
use crate::error::{PracticeError, PracticeResult};
use crate::infra::coalescer::GenerationCoalescer;
use crate::presentation::dto::{
    NextQuestionsRequest, NextQuestionsResponse, StartSessionRequest, StartSessionResponse,
};

/// Shared state for practice handlers
pub struct PracticeAppState<R, G>
where
    R: PracticeSessionRepository + ContentStore + Clone + Send + Sync + 'static,
    G: QuestionGenerator + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub generator: Arc<G>,
    pub coalescer: Arc<GenerationCoalescer<GeneratedBatch>>,
    pub locks: Arc<KeyedLocks<Uuid>>,
    pub config: Arc<PracticeConfig>,
}

impl<R, G> Clone for PracticeAppState<R, G>
where
    R: PracticeSessionRepository + ContentStore + Clone + Send + Sync + 'static,
    G: QuestionGenerator + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            generator: self.generator.clone(),
            coalescer: self.coalescer.clone(),
            locks: self.locks.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/practice/sessions
pub async fn start_session<R, G>(
    State(state): State<PracticeAppState<R, G>>,
    headers: HeaderMap,
    Json(req): Json<StartSessionRequest>,
) -> PracticeResult<Json<StartSessionResponse>>
where
    R: PracticeSessionRepository + ContentStore + Clone + Send + Sync + 'static,
    G: QuestionGenerator + Send + Sync + 'static,
{
    let owner_id = extract_owner_id(&headers)?;

    let use_case = StartPracticeSessionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.generator.clone(),
        state.coalescer.clone(),
        state.config.clone(),
    );

    let input = StartSessionInput {
        content_ids: req
            .content_ids
            .into_iter()
            .map(DocumentId::from_uuid)
            .collect(),
    };

    let output = use_case.execute(input, owner_id).await?;

    Ok(Json(StartSessionResponse {
        session_id: output.session_id,
        batch_number: output.batch_number,
        question_count: output.question_count,
    }))
}

/// POST /api/practice/sessions/{id}/next
pub async fn next_questions<R, G>(
    State(state): State<PracticeAppState<R, G>>,
    Path(session_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<NextQuestionsRequest>,
) -> PracticeResult<Json<NextQuestionsResponse>>
where
    R: PracticeSessionRepository + ContentStore + Clone + Send + Sync + 'static,
    G: QuestionGenerator + Send + Sync + 'static,
{
    let owner_id = extract_owner_id(&headers)?;

    let use_case = NextQuestionsUseCase::new(
        state.repo.clone(),
        state.generator.clone(),
        state.locks.clone(),
        state.config.clone(),
    );

    let input = NextQuestionsInput {
        session_id: PracticeSessionId::from_uuid(session_id),
        limit: req.limit,
    };

    let output = use_case.execute(input, owner_id).await?;

    Ok(Json(NextQuestionsResponse {
        questions: output.questions.into_iter().map(Into::into).collect(),
        remaining: output.remaining,
        new_batch_generated: output.new_batch_generated,
    }))
}

/// Extract the authenticated user id set by the upstream gateway
///
/// Authentication itself happens outside this service; by the time a
/// request reaches us the gateway has attached the user id as a header.
pub fn extract_owner_id(headers: &HeaderMap) -> PracticeResult<Uuid> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| PracticeError::MissingHeader("X-User-Id".to_string()))?;

    raw.parse()
        .map_err(|_| PracticeError::MissingHeader("X-User-Id".to_string()))
}
