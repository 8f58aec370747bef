//! HTTP Question Generator
//!
//! Client for the upstream generation service. The service owns prompt
//! assembly and LLM access; this side only ships context and prior topics
//! and decodes the resulting batch.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::generator::{
    GeneratedBatch, GeneratedQuestion, GenerationError, QuestionGenerator,
};

/// Question generator backed by an HTTP generation service
#[derive(Clone)]
pub struct HttpQuestionGenerator {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    context: &'a str,
    prior_topics: &'a [String],
}

#[derive(Deserialize)]
struct GenerateResponse {
    questions: Vec<GeneratedQuestion>,
}

impl HttpQuestionGenerator {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

impl QuestionGenerator for HttpQuestionGenerator {
    async fn generate(
        &self,
        context: &str,
        prior_topics: &[String],
    ) -> Result<GeneratedBatch, GenerationError> {
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&GenerateRequest {
                context,
                prior_topics,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            return Err(GenerationError::Upstream(format!(
                "generation service returned {}",
                status
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        tracing::debug!(questions = body.questions.len(), "Generator responded");

        Ok(GeneratedBatch {
            questions: body.questions,
        })
    }
}
