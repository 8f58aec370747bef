//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! The storage layer is expected to serialize writes to the same card.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::ReviewCard;
use crate::error::ReviewResult;

/// ReviewCard repository trait
#[trait_variant::make(CardRepository: Send)]
pub trait LocalCardRepository {
    /// Create a new card
    async fn create(&self, card: &ReviewCard) -> ReviewResult<()>;

    /// Get a card by ID, scoped to its owner
    async fn get(&self, card_id: Uuid, owner_id: Uuid) -> ReviewResult<Option<ReviewCard>>;

    /// Persist the scheduling state of a reviewed card
    async fn update_schedule(&self, card: &ReviewCard) -> ReviewResult<()>;

    /// List cards due at `now` for an owner, up to `limit`
    async fn list_due(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
        limit: u32,
    ) -> ReviewResult<Vec<ReviewCard>>;
}
