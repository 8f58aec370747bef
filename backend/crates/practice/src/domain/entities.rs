//! Domain Entities
//!
//! Session state for paginated question delivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::generator::GeneratedQuestion;

/// Delivery status of a question within a session
///
/// `Shown` is terminal: a shown question is never delivered again in the
/// same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Unseen,
    Shown,
}

/// A question held by a session, with its delivery status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuestion {
    pub question: GeneratedQuestion,
    pub status: QuestionStatus,
}

impl SessionQuestion {
    fn new(question: GeneratedQuestion) -> Self {
        Self {
            question,
            status: QuestionStatus::Unseen,
        }
    }
}

/// One generated batch within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBatch {
    /// Monotonic from 1 within the session, no gaps
    pub number: u32,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<SessionQuestion>,
}

impl QuestionBatch {
    fn new(number: u32, questions: Vec<GeneratedQuestion>) -> Self {
        Self {
            number,
            created_at: Utc::now(),
            questions: questions.into_iter().map(SessionQuestion::new).collect(),
        }
    }
}

/// QuestionBatchSession entity - a paginated pool of generated questions
///
/// Status transitions happen only through [`QuestionBatchSession::take_unseen`];
/// callers must serialize mutation per session (the application layer holds
/// a per-session lock).
#[derive(Debug, Clone)]
pub struct QuestionBatchSession {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Fingerprint of the source content set this session was built from
    pub content_key: String,
    /// Accumulated context handed to the generator on replenishment
    pub context_summary: String,
    pub batches: Vec<QuestionBatch>,
    /// Running count of all questions ever generated into this session
    pub total_questions: u32,
    /// Topics already covered, passed to the generator to avoid repeats
    pub covered_topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionBatchSession {
    /// Create an empty session (no batches yet)
    pub fn new(owner_id: Uuid, content_key: String, context_summary: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            content_key,
            context_summary,
            batches: Vec::new(),
            total_questions: 0,
            covered_topics: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number the next batch would get
    pub fn next_batch_number(&self) -> u32 {
        self.batches.last().map(|b| b.number).unwrap_or(0) + 1
    }

    /// Append a freshly generated batch
    ///
    /// Updates the running totals and seeds `covered_topics` from the first
    /// `topic_seed` distinct topics of the new batch. Returns the batch
    /// number assigned.
    pub fn append_batch(&mut self, questions: Vec<GeneratedQuestion>, topic_seed: usize) -> u32 {
        let number = self.next_batch_number();

        for question in questions.iter().take(topic_seed) {
            if !question.topic.is_empty() && !self.covered_topics.contains(&question.topic) {
                self.covered_topics.push(question.topic.clone());
            }
        }

        self.total_questions += questions.len() as u32;
        self.batches.push(QuestionBatch::new(number, questions));
        self.updated_at = Utc::now();

        number
    }

    /// Count of questions not yet delivered
    pub fn unseen_count(&self) -> usize {
        self.batches
            .iter()
            .flat_map(|b| &b.questions)
            .filter(|q| q.status == QuestionStatus::Unseen)
            .count()
    }

    /// Whether every delivered question has been shown
    pub fn is_exhausted(&self) -> bool {
        self.unseen_count() == 0
    }

    /// Take up to `limit` unseen questions in stored order, marking them shown
    ///
    /// The transition is irrevocable; a question returned here will never be
    /// returned again.
    pub fn take_unseen(&mut self, limit: usize) -> Vec<GeneratedQuestion> {
        let mut taken = Vec::new();

        for batch in &mut self.batches {
            for sq in &mut batch.questions {
                if taken.len() == limit {
                    break;
                }
                if sq.status == QuestionStatus::Unseen {
                    sq.status = QuestionStatus::Shown;
                    taken.push(sq.question.clone());
                }
            }
        }

        if !taken.is_empty() {
            self.updated_at = Utc::now();
        }

        taken
    }
}
