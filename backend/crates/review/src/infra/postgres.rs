//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::ReviewCard;
use crate::domain::repository::CardRepository;
use crate::error::ReviewResult;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CardRepository for PgReviewRepository {
    async fn create(&self, card: &ReviewCard) -> ReviewResult<()> {
        sqlx::query(
            r#"
            INSERT INTO review_cards (
                card_id,
                owner_id,
                repetitions,
                ease_factor,
                interval_days,
                next_review_at,
                last_reviewed_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(card.id)
        .bind(card.owner_id)
        .bind(card.repetitions as i32)
        .bind(card.ease_factor)
        .bind(card.interval_days)
        .bind(card.next_review_at)
        .bind(card.last_reviewed_at)
        .bind(card.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(card_id = %card.id, "Card row created");

        Ok(())
    }

    async fn get(&self, card_id: Uuid, owner_id: Uuid) -> ReviewResult<Option<ReviewCard>> {
        let row = sqlx::query_as::<_, ReviewCardRow>(
            r#"
            SELECT
                card_id,
                owner_id,
                repetitions,
                ease_factor,
                interval_days,
                next_review_at,
                last_reviewed_at,
                created_at
            FROM review_cards
            WHERE card_id = $1 AND owner_id = $2
            "#,
        )
        .bind(card_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ReviewCardRow::into_card))
    }

    async fn update_schedule(&self, card: &ReviewCard) -> ReviewResult<()> {
        // Single UPDATE by primary key; the database serializes writes to
        // the same card.
        sqlx::query(
            r#"
            UPDATE review_cards
            SET repetitions = $2,
                ease_factor = $3,
                interval_days = $4,
                next_review_at = $5,
                last_reviewed_at = $6
            WHERE card_id = $1
            "#,
        )
        .bind(card.id)
        .bind(card.repetitions as i32)
        .bind(card.ease_factor)
        .bind(card.interval_days)
        .bind(card.next_review_at)
        .bind(card.last_reviewed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_due(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
        limit: u32,
    ) -> ReviewResult<Vec<ReviewCard>> {
        let rows = sqlx::query_as::<_, ReviewCardRow>(
            r#"
            SELECT
                card_id,
                owner_id,
                repetitions,
                ease_factor,
                interval_days,
                next_review_at,
                last_reviewed_at,
                created_at
            FROM review_cards
            WHERE owner_id = $1 AND next_review_at <= $2
            ORDER BY next_review_at
            LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(now)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReviewCardRow::into_card).collect())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ReviewCardRow {
    card_id: Uuid,
    owner_id: Uuid,
    repetitions: i32,
    ease_factor: f64,
    interval_days: i64,
    next_review_at: DateTime<Utc>,
    last_reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ReviewCardRow {
    fn into_card(self) -> ReviewCard {
        ReviewCard {
            id: self.card_id,
            owner_id: self.owner_id,
            repetitions: self.repetitions as u32,
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            next_review_at: self.next_review_at,
            last_reviewed_at: self.last_reviewed_at,
            created_at: self.created_at,
        }
    }
}
