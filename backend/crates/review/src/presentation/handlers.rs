//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use kernel::id::CardId;
use uuid::Uuid;

use crate::application::config::ReviewConfig;
use crate::application::create_card::CreateCardUseCase;
use crate::application::due_cards::DueCardsUseCase;
use crate::application::review_card::{ReviewCardInput, ReviewCardUseCase};
use crate::domain::entities::ReviewCard;
use crate::domain::repository::CardRepository;
use crate::error::{ReviewError, ReviewResult};
use crate::presentation::dto::{
    CardResponse, DueQuery, DueResponse, ReviewRequest, ReviewResponse,
};

/// Shared state for review handlers
#[derive(Clone)]
pub struct ReviewAppState<R>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ReviewConfig>,
}

/// POST /api/review/cards
pub async fn create_card<R>(
    State(state): State<ReviewAppState<R>>,
    headers: HeaderMap,
) -> ReviewResult<Json<CardResponse>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let owner_id = extract_owner_id(&headers)?;

    let use_case = CreateCardUseCase::new(state.repo.clone());
    let card = use_case.execute(owner_id).await?;

    Ok(Json(card_response(&card)))
}

/// POST /api/review/cards/{id}/review
pub async fn review_card<R>(
    State(state): State<ReviewAppState<R>>,
    Path(card_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<ReviewRequest>,
) -> ReviewResult<Json<ReviewResponse>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let owner_id = extract_owner_id(&headers)?;

    let use_case = ReviewCardUseCase::new(state.repo.clone());

    let input = ReviewCardInput {
        card_id: CardId::from_uuid(card_id),
        quality: req.quality,
    };

    let output = use_case.execute(input, owner_id).await?;

    Ok(Json(ReviewResponse {
        card_id: output.card_id,
        repetitions: output.repetitions,
        ease_factor: output.ease_factor,
        interval_days: output.interval_days,
        next_review_at: output.next_review_at,
    }))
}

/// GET /api/review/due
pub async fn due_cards<R>(
    State(state): State<ReviewAppState<R>>,
    Query(query): Query<DueQuery>,
    headers: HeaderMap,
) -> ReviewResult<Json<DueResponse>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let owner_id = extract_owner_id(&headers)?;

    let use_case = DueCardsUseCase::new(state.repo.clone(), state.config.clone());
    let cards = use_case.execute(owner_id, query.limit).await?;

    Ok(Json(DueResponse {
        cards: cards.iter().map(card_response).collect(),
    }))
}

/// Extract the authenticated user id set by the upstream gateway
///
/// Authentication itself happens outside this service; by the time a
/// request reaches us the gateway has attached the user id as a header.
pub fn extract_owner_id(headers: &HeaderMap) -> ReviewResult<Uuid> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ReviewError::MissingHeader("X-User-Id".to_string()))?;

    raw.parse()
        .map_err(|_| ReviewError::MissingHeader("X-User-Id".to_string()))
}

fn card_response(card: &ReviewCard) -> CardResponse {
    CardResponse {
        card_id: card.id,
        repetitions: card.repetitions,
        ease_factor: card.ease_factor,
        interval_days: card.interval_days,
        next_review_at: card.next_review_at,
        last_reviewed_at: card.last_reviewed_at,
    }
}
