//! Create Card Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::ReviewCard;
use crate::domain::repository::CardRepository;
use crate::error::ReviewResult;

/// Create Card Use Case
///
/// Cards are created when a flashcard is first generated; they start due
/// immediately with the default scheduling state.
pub struct CreateCardUseCase<C>
where
    C: CardRepository,
{
    card_repo: Arc<C>,
}

impl<C> CreateCardUseCase<C>
where
    C: CardRepository,
{
    pub fn new(card_repo: Arc<C>) -> Self {
        Self { card_repo }
    }

    pub async fn execute(&self, owner_id: Uuid) -> ReviewResult<ReviewCard> {
        let card = ReviewCard::new(owner_id);
        self.card_repo.create(&card).await?;

        tracing::info!(card_id = %card.id, "Card created");

        Ok(card)
    }
}
