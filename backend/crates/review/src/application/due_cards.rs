//! Due Cards Use Case

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::config::ReviewConfig;
use crate::domain::entities::ReviewCard;
use crate::domain::repository::CardRepository;
use crate::error::{ReviewError, ReviewResult};

/// Due Cards Use Case
pub struct DueCardsUseCase<C>
where
    C: CardRepository,
{
    card_repo: Arc<C>,
    config: Arc<ReviewConfig>,
}

impl<C> DueCardsUseCase<C>
where
    C: CardRepository,
{
    pub fn new(card_repo: Arc<C>, config: Arc<ReviewConfig>) -> Self {
        Self { card_repo, config }
    }

    /// List cards due now for an owner
    ///
    /// `limit` defaults to the configured page size and is capped at the
    /// configured maximum; zero is rejected.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        limit: Option<u32>,
    ) -> ReviewResult<Vec<ReviewCard>> {
        let limit = match limit {
            Some(0) => return Err(ReviewError::InvalidLimit),
            Some(n) => n.min(self.config.max_due_limit),
            None => self.config.default_due_limit,
        };

        let cards = self.card_repo.list_due(owner_id, Utc::now(), limit).await?;

        tracing::debug!(count = cards.len(), "Listed due cards");

        Ok(cards)
    }
}
