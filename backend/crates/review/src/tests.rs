//! Unit tests for review crate

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::ReviewCard;
use crate::domain::repository::CardRepository;
use crate::error::ReviewResult;

/// In-memory card store for use case tests
#[derive(Default)]
struct InMemoryCards {
    cards: Mutex<HashMap<Uuid, ReviewCard>>,
}

impl InMemoryCards {
    fn with_card(card: ReviewCard) -> Self {
        let store = Self::default();
        store.cards.lock().unwrap().insert(card.id, card);
        store
    }

    fn snapshot(&self, card_id: Uuid) -> Option<ReviewCard> {
        self.cards.lock().unwrap().get(&card_id).cloned()
    }
}

impl CardRepository for InMemoryCards {
    async fn create(&self, card: &ReviewCard) -> ReviewResult<()> {
        self.cards.lock().unwrap().insert(card.id, card.clone());
        Ok(())
    }

    async fn get(&self, card_id: Uuid, owner_id: Uuid) -> ReviewResult<Option<ReviewCard>> {
        Ok(self
            .cards
            .lock()
            .unwrap()
            .get(&card_id)
            .filter(|c| c.owner_id == owner_id)
            .cloned())
    }

    async fn update_schedule(&self, card: &ReviewCard) -> ReviewResult<()> {
        self.cards.lock().unwrap().insert(card.id, card.clone());
        Ok(())
    }

    async fn list_due(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
        limit: u32,
    ) -> ReviewResult<Vec<ReviewCard>> {
        let mut due: Vec<ReviewCard> = self
            .cards
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.owner_id == owner_id && c.is_due(now))
            .cloned()
            .collect();
        due.sort_by_key(|c| c.next_review_at);
        due.truncate(limit as usize);
        Ok(due)
    }
}

#[cfg(test)]
mod review_use_case_tests {
    use super::*;
    use crate::application::review_card::{ReviewCardInput, ReviewCardUseCase};
    use crate::error::ReviewError;
    use chrono::Duration;
    use kernel::id::CardId;
    use std::sync::Arc;

    fn input(card_id: Uuid, quality: u8) -> ReviewCardInput {
        ReviewCardInput {
            card_id: CardId::from_uuid(card_id),
            quality,
        }
    }

    #[tokio::test]
    async fn test_first_perfect_review() {
        let owner = Uuid::new_v4();
        let card = ReviewCard::new(owner);
        let card_id = card.id;
        let repo = Arc::new(InMemoryCards::with_card(card));

        let use_case = ReviewCardUseCase::new(repo.clone());
        let before = Utc::now();
        let output = use_case.execute(input(card_id, 5), owner).await.unwrap();

        assert_eq!(output.repetitions, 1);
        assert_eq!(output.interval_days, 1);
        assert!((output.ease_factor - 2.6).abs() < 1e-9);

        // next_review_at = now + 1 day
        let expected = before + Duration::days(1);
        assert!((output.next_review_at - expected).num_seconds().abs() < 5);

        // Persisted state matches the output, and last_reviewed_at is stamped
        let stored = repo.snapshot(card_id).unwrap();
        assert_eq!(stored.repetitions, 1);
        assert!(stored.last_reviewed_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_review_resets_streak() {
        let owner = Uuid::new_v4();
        let mut card = ReviewCard::new(owner);
        card.repetitions = 4;
        card.interval_days = 30;
        let card_id = card.id;
        let repo = Arc::new(InMemoryCards::with_card(card));

        let use_case = ReviewCardUseCase::new(repo);
        let output = use_case.execute(input(card_id, 1), owner).await.unwrap();

        assert_eq!(output.repetitions, 0);
        assert_eq!(output.interval_days, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_quality_rejected_without_mutation() {
        let owner = Uuid::new_v4();
        let card = ReviewCard::new(owner);
        let card_id = card.id;
        let repo = Arc::new(InMemoryCards::with_card(card));

        let use_case = ReviewCardUseCase::new(repo.clone());
        let result = use_case.execute(input(card_id, 6), owner).await;

        assert!(matches!(result, Err(ReviewError::InvalidQuality(6))));

        let stored = repo.snapshot(card_id).unwrap();
        assert_eq!(stored.repetitions, 0);
        assert!(stored.last_reviewed_at.is_none());
    }

    #[tokio::test]
    async fn test_unknown_card_not_found() {
        let repo = Arc::new(InMemoryCards::default());
        let use_case = ReviewCardUseCase::new(repo);

        let result = use_case
            .execute(input(Uuid::new_v4(), 4), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(ReviewError::CardNotFound)));
    }

    #[tokio::test]
    async fn test_card_scoped_to_owner() {
        let owner = Uuid::new_v4();
        let card = ReviewCard::new(owner);
        let card_id = card.id;
        let repo = Arc::new(InMemoryCards::with_card(card));

        let use_case = ReviewCardUseCase::new(repo);
        let result = use_case.execute(input(card_id, 4), Uuid::new_v4()).await;

        assert!(matches!(result, Err(ReviewError::CardNotFound)));
    }
}

#[cfg(test)]
mod due_cards_tests {
    use super::*;
    use crate::application::config::ReviewConfig;
    use crate::application::due_cards::DueCardsUseCase;
    use crate::error::ReviewError;
    use chrono::Duration;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_returns_only_due_cards() {
        let owner = Uuid::new_v4();
        let repo = Arc::new(InMemoryCards::default());

        let due = ReviewCard::new(owner);
        let mut future = ReviewCard::new(owner);
        future.next_review_at = Utc::now() + Duration::days(5);
        repo.create(&due).await.unwrap();
        repo.create(&future).await.unwrap();

        let use_case = DueCardsUseCase::new(repo, Arc::new(ReviewConfig::default()));
        let cards = use_case.execute(owner, None).await.unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, due.id);
    }

    #[tokio::test]
    async fn test_zero_limit_rejected() {
        let repo = Arc::new(InMemoryCards::default());
        let use_case = DueCardsUseCase::new(repo, Arc::new(ReviewConfig::default()));

        let result = use_case.execute(Uuid::new_v4(), Some(0)).await;
        assert!(matches!(result, Err(ReviewError::InvalidLimit)));
    }

    #[tokio::test]
    async fn test_limit_caps_results() {
        let owner = Uuid::new_v4();
        let repo = Arc::new(InMemoryCards::default());
        for _ in 0..5 {
            repo.create(&ReviewCard::new(owner)).await.unwrap();
        }

        let use_case = DueCardsUseCase::new(repo, Arc::new(ReviewConfig::default()));
        let cards = use_case.execute(owner, Some(3)).await.unwrap();

        assert_eq!(cards.len(), 3);
    }

    #[tokio::test]
    async fn test_limit_capped_at_config_max() {
        let owner = Uuid::new_v4();
        let repo = Arc::new(InMemoryCards::default());
        for _ in 0..4 {
            repo.create(&ReviewCard::new(owner)).await.unwrap();
        }

        let config = ReviewConfig {
            default_due_limit: 2,
            max_due_limit: 3,
        };
        let use_case = DueCardsUseCase::new(repo, Arc::new(config));
        let cards = use_case.execute(owner, Some(100)).await.unwrap();

        assert_eq!(cards.len(), 3);
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_review_response_serialization() {
        let response = ReviewResponse {
            card_id: Uuid::nil(),
            repetitions: 2,
            ease_factor: 2.7,
            interval_days: 6,
            next_review_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("cardId"));
        assert!(json.contains("easeFactor"));
        assert!(json.contains("intervalDays"));
        assert!(json.contains("nextReviewAt"));
    }

    #[test]
    fn test_review_request_deserialization() {
        let json = r#"{"quality":4}"#;
        let request: ReviewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.quality, 4);
    }

    #[test]
    fn test_due_query_limit_optional() {
        let query: DueQuery = serde_json::from_str("{}").unwrap();
        assert!(query.limit.is_none());
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(ReviewError, StatusCode)> = vec![
            (ReviewError::CardNotFound, StatusCode::NOT_FOUND),
            (
                ReviewError::InvalidQuality(9),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ReviewError::InvalidLimit, StatusCode::BAD_REQUEST),
            (
                ReviewError::MissingHeader("X-User-Id".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ReviewError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_error_display() {
        assert!(ReviewError::InvalidQuality(7).to_string().contains("7"));
        assert!(ReviewError::CardNotFound.to_string().contains("not found"));
    }
}
