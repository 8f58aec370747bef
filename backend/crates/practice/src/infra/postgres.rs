//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{QuestionBatch, QuestionBatchSession};
use crate::domain::repository::{ContentStore, PracticeSessionRepository};
use crate::error::PracticeResult;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgPracticeRepository {
    pool: PgPool,
}

impl PgPracticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PracticeSessionRepository for PgPracticeRepository {
    async fn create(&self, session: &QuestionBatchSession) -> PracticeResult<()> {
        sqlx::query(
            r#"
            INSERT INTO practice_sessions (
                session_id,
                owner_id,
                content_key,
                context_summary,
                batches,
                total_questions,
                covered_topics,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.id)
        .bind(session.owner_id)
        .bind(&session.content_key)
        .bind(&session.context_summary)
        .bind(Json(&session.batches))
        .bind(session.total_questions as i32)
        .bind(&session.covered_topics)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(session_id = %session.id, "Practice session row created");

        Ok(())
    }

    async fn get(
        &self,
        session_id: Uuid,
        owner_id: Uuid,
    ) -> PracticeResult<Option<QuestionBatchSession>> {
        let row = sqlx::query_as::<_, PracticeSessionRow>(
            r#"
            SELECT
                session_id,
                owner_id,
                content_key,
                context_summary,
                batches,
                total_questions,
                covered_topics,
                created_at,
                updated_at
            FROM practice_sessions
            WHERE session_id = $1 AND owner_id = $2
            "#,
        )
        .bind(session_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PracticeSessionRow::into_session))
    }

    async fn update(&self, session: &QuestionBatchSession) -> PracticeResult<()> {
        sqlx::query(
            r#"
            UPDATE practice_sessions
            SET batches = $2,
                total_questions = $3,
                covered_topics = $4,
                updated_at = $5
            WHERE session_id = $1
            "#,
        )
        .bind(session.id)
        .bind(Json(&session.batches))
        .bind(session.total_questions as i32)
        .bind(&session.covered_topics)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl ContentStore for PgPracticeRepository {
    async fn extracted_text(&self, content_id: Uuid) -> PracticeResult<Option<String>> {
        let text = sqlx::query_scalar::<_, String>(
            "SELECT extracted_text FROM documents WHERE document_id = $1",
        )
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(text)
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct PracticeSessionRow {
    session_id: Uuid,
    owner_id: Uuid,
    content_key: String,
    context_summary: String,
    batches: Json<Vec<QuestionBatch>>,
    total_questions: i32,
    covered_topics: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PracticeSessionRow {
    fn into_session(self) -> QuestionBatchSession {
        QuestionBatchSession {
            id: self.session_id,
            owner_id: self.owner_id,
            content_key: self.content_key,
            context_summary: self.context_summary,
            batches: self.batches.0,
            total_questions: self.total_questions as u32,
            covered_topics: self.covered_topics,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
