//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::generator::GeneratedQuestion;

/// Request for POST /api/practice/sessions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub content_ids: Vec<Uuid>,
}

/// Response for POST /api/practice/sessions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: Uuid,
    pub batch_number: u32,
    pub question_count: u32,
}

/// Request for POST /api/practice/sessions/{id}/next
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionsRequest {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// A delivered question
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: Uuid,
    pub topic: String,
    pub payload: serde_json::Value,
}

impl From<GeneratedQuestion> for QuestionResponse {
    fn from(q: GeneratedQuestion) -> Self {
        Self {
            id: q.id,
            topic: q.topic,
            payload: q.payload,
        }
    }
}

/// Response for POST /api/practice/sessions/{id}/next
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionsResponse {
    pub questions: Vec<QuestionResponse>,
    pub remaining: usize,
    pub new_batch_generated: bool,
}
