//! Domain Services
//!
//! Pure scheduling logic (SM-2 variant). No I/O, no clock access except
//! where `now` is passed in explicitly.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{MIN_EASE_FACTOR, ReviewCard};
use crate::domain::value_objects::Quality;

/// Result of one scheduling step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleUpdate {
    pub repetitions: u32,
    pub ease_factor: f64,
    pub interval_days: i64,
}

/// Apply one review to a card's scheduling state
///
/// Failed recall (quality < 3) resets the streak: repetitions 0, interval
/// 1 day. Successful recall advances the streak; the interval is 1 day on
/// the first success, 6 on the second, then grows by the card's ease
/// factor. The ease factor is updated on every review and floored at 1.3.
///
/// The interval growth uses the ease factor as it was *before* this
/// review's ease adjustment.
pub fn apply_review(
    repetitions: u32,
    ease_factor: f64,
    interval_days: i64,
    quality: Quality,
) -> ScheduleUpdate {
    let (new_repetitions, new_interval) = if !quality.is_passing() {
        // Forgot: the item must be seen again immediately
        (0, 1)
    } else {
        let interval = match repetitions {
            0 => 1,
            1 => 6,
            _ => ((interval_days as f64) * ease_factor).round() as i64,
        };
        (repetitions + 1, interval)
    };

    ScheduleUpdate {
        repetitions: new_repetitions,
        ease_factor: next_ease_factor(ease_factor, quality),
        interval_days: new_interval,
    }
}

/// SM-2 ease factor update, floored at [`MIN_EASE_FACTOR`]
///
/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let q = quality.value() as f64;
    let delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    (ease_factor + delta).max(MIN_EASE_FACTOR)
}

/// Compute the next review timestamp from an interval in days
pub fn next_review_at(now: DateTime<Utc>, interval_days: i64) -> DateTime<Utc> {
    now + Duration::days(interval_days)
}

/// Filter cards due at `now`
///
/// Order is unspecified; limiting and sorting are the caller's concern.
pub fn due_cards<'a>(cards: &'a [ReviewCard], now: DateTime<Utc>) -> Vec<&'a ReviewCard> {
    cards.iter().filter(|c| c.is_due(now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    #[test]
    fn test_failed_recall_resets_streak() {
        for quality in 0..3 {
            let update = apply_review(7, 2.2, 42, q(quality));
            assert_eq!(update.repetitions, 0);
            assert_eq!(update.interval_days, 1);
        }
    }

    #[test]
    fn test_interval_progression() {
        // First success
        let first = apply_review(0, 2.5, 1, q(5));
        assert_eq!(first.repetitions, 1);
        assert_eq!(first.interval_days, 1);
        assert!((first.ease_factor - 2.6).abs() < 1e-9);

        // Second success
        let second = apply_review(
            first.repetitions,
            first.ease_factor,
            first.interval_days,
            q(5),
        );
        assert_eq!(second.repetitions, 2);
        assert_eq!(second.interval_days, 6);
        assert!((second.ease_factor - 2.7).abs() < 1e-9);

        // Third success: round(6 * 2.7) = 16
        let third = apply_review(
            second.repetitions,
            second.ease_factor,
            second.interval_days,
            q(5),
        );
        assert_eq!(third.repetitions, 3);
        assert_eq!(third.interval_days, 16);
    }

    #[test]
    fn test_failure_after_streak_drops_ease() {
        // End-to-end scenario: two perfect reviews then a failure
        let a = apply_review(0, 2.5, 1, q(5));
        let b = apply_review(a.repetitions, a.ease_factor, a.interval_days, q(5));
        let c = apply_review(b.repetitions, b.ease_factor, b.interval_days, q(2));

        assert_eq!(c.repetitions, 0);
        assert_eq!(c.interval_days, 1);
        // 2.7 + (0.1 - 3 * (0.08 + 3 * 0.02)) = 2.38
        assert!((c.ease_factor - 2.38).abs() < 1e-9);
    }

    #[test]
    fn test_ease_factor_floor() {
        let mut state = apply_review(5, 1.4, 30, q(0));
        for _ in 0..20 {
            state = apply_review(state.repetitions, state.ease_factor, state.interval_days, q(0));
            assert!(state.ease_factor >= MIN_EASE_FACTOR);
        }
        assert!((state.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_ease_floor_holds_for_all_qualities() {
        for quality in 0..=5 {
            let update = apply_review(3, MIN_EASE_FACTOR, 10, q(quality));
            assert!(update.ease_factor >= MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_perfect_recall_raises_ease() {
        assert!((next_ease_factor(2.5, q(5)) - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_quality_four_keeps_ease() {
        // 0.1 - 1 * (0.08 + 0.02) = 0
        assert!((next_ease_factor(2.5, q(4)) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let a = apply_review(2, 2.36, 11, q(4));
        let b = apply_review(2, 2.36, 11, q(4));
        assert_eq!(a, b);
    }

    #[test]
    fn test_next_review_at_adds_interval() {
        let now = Utc::now();
        assert_eq!(next_review_at(now, 6), now + Duration::days(6));
    }

    #[test]
    fn test_due_cards_filter() {
        use crate::domain::entities::ReviewCard;
        use uuid::Uuid;

        let now = Utc::now();
        let owner = Uuid::new_v4();

        let due = ReviewCard::new(owner);
        let mut future = ReviewCard::new(owner);
        future.next_review_at = now + Duration::days(3);

        let cards = vec![due.clone(), future];
        let result = due_cards(&cards, now);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, due.id);
    }
}
