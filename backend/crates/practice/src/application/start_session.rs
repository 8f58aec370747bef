//! Start Practice Session Use Case

use std::sync::Arc;

use kernel::id::DocumentId;
use uuid::Uuid;

use crate::application::config::PracticeConfig;
use crate::domain::entities::QuestionBatchSession;
use crate::domain::generator::{GeneratedBatch, QuestionGenerator};
use crate::domain::repository::{ContentStore, PracticeSessionRepository};
use crate::domain::value_objects::{GenerationMode, RequestFingerprint};
use crate::error::{PracticeError, PracticeResult};
use crate::infra::coalescer::GenerationCoalescer;

/// Input DTO for starting a session
#[derive(Debug, Clone)]
pub struct StartSessionInput {
    pub content_ids: Vec<DocumentId>,
}

/// Output DTO for starting a session
#[derive(Debug, Clone)]
pub struct StartSessionOutput {
    pub session_id: Uuid,
    pub batch_number: u32,
    pub question_count: u32,
}

/// Start Practice Session Use Case
///
/// Creating a session synchronously produces its first batch; the creation
/// goes through the coalescer so that concurrent identical requests share
/// one generation call.
pub struct StartPracticeSessionUseCase<S, D, G>
where
    S: PracticeSessionRepository,
    D: ContentStore,
    G: QuestionGenerator,
{
    session_repo: Arc<S>,
    content_store: Arc<D>,
    generator: Arc<G>,
    coalescer: Arc<GenerationCoalescer<GeneratedBatch>>,
    config: Arc<PracticeConfig>,
}

impl<S, D, G> StartPracticeSessionUseCase<S, D, G>
where
    S: PracticeSessionRepository,
    D: ContentStore,
    G: QuestionGenerator,
{
    pub fn new(
        session_repo: Arc<S>,
        content_store: Arc<D>,
        generator: Arc<G>,
        coalescer: Arc<GenerationCoalescer<GeneratedBatch>>,
        config: Arc<PracticeConfig>,
    ) -> Self {
        Self {
            session_repo,
            content_store,
            generator,
            coalescer,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: StartSessionInput,
        owner_id: Uuid,
    ) -> PracticeResult<StartSessionOutput> {
        if input.content_ids.is_empty() {
            return Err(PracticeError::EmptyContent);
        }

        let content_ids: Vec<Uuid> = input.content_ids.iter().map(|id| id.into_uuid()).collect();

        // Assemble the generation context from the extracted document texts
        let mut context = String::new();
        for content_id in &content_ids {
            let text = self
                .content_store
                .extracted_text(*content_id)
                .await?
                .ok_or(PracticeError::ContentNotFound)?;
            if !context.is_empty() {
                context.push_str("\n\n");
            }
            context.push_str(&text);
        }
        truncate_chars(&mut context, self.config.context_max_chars);

        let fingerprint = RequestFingerprint::new(
            owner_id,
            &content_ids,
            GenerationMode::Practice,
            context.len(),
        );

        let batch = self
            .coalescer
            .coalesce(&fingerprint, || async {
                self.generator.generate(&context, &[]).await
            })
            .await?;

        let mut session =
            QuestionBatchSession::new(owner_id, fingerprint.as_str().to_string(), context);
        let batch_number = session.append_batch(batch.questions, self.config.topic_seed_count);

        self.session_repo.create(&session).await?;

        tracing::info!(
            session_id = %session.id,
            documents = content_ids.len(),
            questions = session.total_questions,
            "Practice session started"
        );

        Ok(StartSessionOutput {
            session_id: session.id,
            batch_number,
            question_count: session.total_questions,
        })
    }
}

/// Truncate a string to at most `max_chars` characters on a char boundary
fn truncate_chars(s: &mut String, max_chars: usize) {
    if let Some((idx, _)) = s.char_indices().nth(max_chars) {
        s.truncate(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        let mut s = "héllo wörld".to_string();
        truncate_chars(&mut s, 5);
        assert_eq!(s, "héllo");

        let mut short = "abc".to_string();
        truncate_chars(&mut short, 10);
        assert_eq!(short, "abc");
    }
}
