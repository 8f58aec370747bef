//! Generator Capability
//!
//! Contract for the upstream question generator. The core treats it as an
//! opaque, slow, failable operation; question content is never interpreted
//! beyond identity and topic.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single generated practice question
///
/// The payload keeps whatever shape the generator produced; only `id` and
/// `topic` matter to the session logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub id: Uuid,
    pub topic: String,
    pub payload: serde_json::Value,
}

/// One generator response: an ordered batch of questions
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub questions: Vec<GeneratedQuestion>,
}

/// Upstream generation failure
///
/// Cloneable so a single failure can be handed to every coalesced waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The upstream call did not complete in time
    #[error("Generation timed out")]
    Timeout,

    /// The upstream service rejected the request due to rate limiting
    #[error("Generator rate limit exceeded")]
    RateLimited,

    /// The upstream response could not be decoded
    #[error("Malformed generator output: {0}")]
    Malformed(String),

    /// Any other upstream failure
    #[error("Upstream generation failed: {0}")]
    Upstream(String),

    /// The owning request went away before publishing a result
    #[error("Generation abandoned before completing")]
    Abandoned,
}

/// Question generator capability trait
#[trait_variant::make(QuestionGenerator: Send)]
pub trait LocalQuestionGenerator {
    /// Generate a batch of questions for the given context
    ///
    /// `prior_topics` lists topics already covered in the session so the
    /// generator can steer away from repeats.
    async fn generate(
        &self,
        context: &str,
        prior_topics: &[String],
    ) -> Result<GeneratedBatch, GenerationError>;
}
