//! Repository Traits
//!
//! Interfaces for data persistence and the read-only document store.
//! Implementations live in the infrastructure layer.

use uuid::Uuid;

use crate::domain::entities::QuestionBatchSession;
use crate::error::PracticeResult;

/// Practice session repository trait
#[trait_variant::make(PracticeSessionRepository: Send)]
pub trait LocalPracticeSessionRepository {
    /// Create a new session
    async fn create(&self, session: &QuestionBatchSession) -> PracticeResult<()>;

    /// Get a session by ID, scoped to its owner
    async fn get(
        &self,
        session_id: Uuid,
        owner_id: Uuid,
    ) -> PracticeResult<Option<QuestionBatchSession>>;

    /// Persist session state (shown marks, appended batches, totals)
    async fn update(&self, session: &QuestionBatchSession) -> PracticeResult<()>;
}

/// Read-only access to extracted document text
///
/// The core never writes or parses documents; extraction happens upstream.
#[trait_variant::make(ContentStore: Send)]
pub trait LocalContentStore {
    /// Extracted text for a source document, if the document exists
    async fn extracted_text(&self, content_id: Uuid) -> PracticeResult<Option<String>>;
}
