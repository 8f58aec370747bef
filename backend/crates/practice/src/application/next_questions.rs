//! Next Questions Use Case

use std::sync::Arc;

use kernel::id::PracticeSessionId;
use platform::sync::KeyedLocks;
use uuid::Uuid;

use crate::application::config::PracticeConfig;
use crate::domain::generator::{GeneratedQuestion, GenerationError, QuestionGenerator};
use crate::domain::repository::PracticeSessionRepository;
use crate::error::{PracticeError, PracticeResult};

/// Input DTO for a next-questions request
#[derive(Debug, Clone)]
pub struct NextQuestionsInput {
    pub session_id: PracticeSessionId,
    pub limit: Option<usize>,
}

/// Output DTO for a next-questions request
#[derive(Debug, Clone)]
pub struct NextQuestionsOutput {
    pub questions: Vec<GeneratedQuestion>,
    /// Unseen questions left after this delivery
    pub remaining: usize,
    pub new_batch_generated: bool,
}

/// Next Questions Use Case
///
/// Delivers up to `limit` unseen questions, replenishing the pool from the
/// generator when it is exhausted. Mutation is serialized per session via
/// a keyed lock, so concurrent calls never hand out the same question.
pub struct NextQuestionsUseCase<S, G>
where
    S: PracticeSessionRepository,
    G: QuestionGenerator,
{
    session_repo: Arc<S>,
    generator: Arc<G>,
    locks: Arc<KeyedLocks<Uuid>>,
    config: Arc<PracticeConfig>,
}

impl<S, G> NextQuestionsUseCase<S, G>
where
    S: PracticeSessionRepository,
    G: QuestionGenerator,
{
    pub fn new(
        session_repo: Arc<S>,
        generator: Arc<G>,
        locks: Arc<KeyedLocks<Uuid>>,
        config: Arc<PracticeConfig>,
    ) -> Self {
        Self {
            session_repo,
            generator,
            locks,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: NextQuestionsInput,
        owner_id: Uuid,
    ) -> PracticeResult<NextQuestionsOutput> {
        // Validate before touching any state
        let limit = input.limit.unwrap_or(self.config.default_question_limit);
        if limit == 0 || limit > self.config.max_question_limit {
            return Err(PracticeError::InvalidLimit);
        }

        let session_id = input.session_id.into_uuid();

        // Per-session exclusion: load-mutate-store must not interleave
        let lock = self.locks.lock_for(&session_id);
        let _guard = lock.lock().await;

        let mut session = self
            .session_repo
            .get(session_id, owner_id)
            .await?
            .ok_or(PracticeError::SessionNotFound)?;

        let mut new_batch_generated = false;
        let mut questions = session.take_unseen(limit);

        if questions.is_empty() {
            // Pool exhausted: ask the generator for a fresh batch, steering
            // it away from topics the session has already covered. On
            // failure nothing is persisted, so the caller can simply retry.
            let batch = self
                .generator
                .generate(&session.context_summary, &session.covered_topics)
                .await?;

            if batch.questions.is_empty() {
                return Err(PracticeError::Generation(GenerationError::Malformed(
                    "generator returned an empty batch".to_string(),
                )));
            }

            let batch_number =
                session.append_batch(batch.questions, self.config.topic_seed_count);
            new_batch_generated = true;

            tracing::info!(
                session_id = %session.id,
                batch_number = batch_number,
                total_questions = session.total_questions,
                "Generated replacement batch"
            );

            questions = session.take_unseen(limit);
        }

        self.session_repo.update(&session).await?;

        tracing::debug!(
            session_id = %session.id,
            delivered = questions.len(),
            remaining = session.unseen_count(),
            "Delivered practice questions"
        );

        Ok(NextQuestionsOutput {
            remaining: session.unseen_count(),
            questions,
            new_batch_generated,
        })
    }
}
