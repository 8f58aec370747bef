//! Domain Entities
//!
//! Core entities for the review domain.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Initial ease factor for a freshly created card
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Hard floor for the ease factor
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// ReviewCard entity - a single learning item under spaced repetition
///
/// Scheduling state is mutated only by the review use case; deletion is
/// an external concern.
#[derive(Debug, Clone)]
pub struct ReviewCard {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Consecutive successful reviews; resets to 0 on failed recall
    pub repetitions: u32,
    /// Interval multiplier, never below [`MIN_EASE_FACTOR`]
    pub ease_factor: f64,
    /// Days until the next review, never below 1
    pub interval_days: i64,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ReviewCard {
    /// Create a new card with default scheduling state
    ///
    /// A new card is due immediately: repetitions 0, ease 2.5, interval 1 day.
    pub fn new(owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            repetitions: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 1,
            next_review_at: now,
            last_reviewed_at: None,
            created_at: now,
        }
    }

    /// Check if the card is due for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_defaults() {
        let owner = Uuid::new_v4();
        let card = ReviewCard::new(owner);

        assert_eq!(card.owner_id, owner);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.ease_factor, INITIAL_EASE_FACTOR);
        assert_eq!(card.interval_days, 1);
        assert!(card.last_reviewed_at.is_none());
    }

    #[test]
    fn test_new_card_is_due_immediately() {
        let card = ReviewCard::new(Uuid::new_v4());
        assert!(card.is_due(Utc::now()));
    }

    #[test]
    fn test_due_boundary_is_inclusive() {
        let card = ReviewCard::new(Uuid::new_v4());
        assert!(card.is_due(card.next_review_at));
    }
}
