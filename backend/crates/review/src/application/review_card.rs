//! Review Card Use Case

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::CardId;
use uuid::Uuid;

use crate::domain::repository::CardRepository;
use crate::domain::services::{apply_review, next_review_at};
use crate::domain::value_objects::Quality;
use crate::error::{ReviewError, ReviewResult};

/// Input DTO for a review
#[derive(Debug, Clone)]
pub struct ReviewCardInput {
    pub card_id: CardId,
    /// Raw rating from the client; validated here before any mutation
    pub quality: u8,
}

/// Output DTO for a review
#[derive(Debug, Clone)]
pub struct ReviewCardOutput {
    pub card_id: Uuid,
    pub repetitions: u32,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub next_review_at: DateTime<Utc>,
}

/// Review Card Use Case
pub struct ReviewCardUseCase<C>
where
    C: CardRepository,
{
    card_repo: Arc<C>,
}

impl<C> ReviewCardUseCase<C>
where
    C: CardRepository,
{
    pub fn new(card_repo: Arc<C>) -> Self {
        Self { card_repo }
    }

    pub async fn execute(
        &self,
        input: ReviewCardInput,
        owner_id: Uuid,
    ) -> ReviewResult<ReviewCardOutput> {
        // Validate before touching any state
        let quality =
            Quality::new(input.quality).ok_or(ReviewError::InvalidQuality(input.quality))?;

        let mut card = self
            .card_repo
            .get(input.card_id.into_uuid(), owner_id)
            .await?
            .ok_or(ReviewError::CardNotFound)?;

        let update = apply_review(
            card.repetitions,
            card.ease_factor,
            card.interval_days,
            quality,
        );

        let now = Utc::now();
        card.repetitions = update.repetitions;
        card.ease_factor = update.ease_factor;
        card.interval_days = update.interval_days;
        card.next_review_at = next_review_at(now, update.interval_days);
        card.last_reviewed_at = Some(now);

        self.card_repo.update_schedule(&card).await?;

        tracing::info!(
            card_id = %card.id,
            quality = quality.value(),
            repetitions = card.repetitions,
            interval_days = card.interval_days,
            "Card reviewed"
        );

        Ok(ReviewCardOutput {
            card_id: card.id,
            repetitions: card.repetitions,
            ease_factor: card.ease_factor,
            interval_days: card.interval_days,
            next_review_at: card.next_review_at,
        })
    }
}
