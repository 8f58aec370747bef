//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/review/cards/{id}/review
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub quality: u8,
}

/// Response for POST /api/review/cards/{id}/review
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub card_id: Uuid,
    pub repetitions: u32,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub next_review_at: DateTime<Utc>,
}

/// Response for POST /api/review/cards
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub card_id: Uuid,
    pub repetitions: u32,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

/// Query for GET /api/review/due
#[derive(Debug, Clone, Deserialize)]
pub struct DueQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Response for GET /api/review/due
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueResponse {
    pub cards: Vec<CardResponse>,
}
