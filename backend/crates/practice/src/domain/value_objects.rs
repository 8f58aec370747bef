//! Domain Value Objects
//!
//! Immutable value types for the practice domain.

use uuid::Uuid;

/// Kind of content generation a request asks for
///
/// Part of the request fingerprint: a summary and a flashcard set over the
/// same documents are different requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Summary,
    Flashcards,
    Practice,
}

impl GenerationMode {
    /// Stable string form used in the fingerprint preimage
    pub const fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Summary => "summary",
            GenerationMode::Flashcards => "flashcards",
            GenerationMode::Practice => "practice",
        }
    }
}

/// Deduplication key for a generation request
///
/// SHA-256 over the identity-relevant request fields: owner, the set of
/// source documents (order-independent), generation mode, and the length
/// of the extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestFingerprint(String);

impl RequestFingerprint {
    pub fn new(
        owner_id: Uuid,
        content_ids: &[Uuid],
        mode: GenerationMode,
        content_len: usize,
    ) -> Self {
        // Sort so that the same document set always fingerprints the same
        let mut ids: Vec<Uuid> = content_ids.to_vec();
        ids.sort();

        let mut preimage = format!("{}\n{}\n{}", owner_id, mode.as_str(), content_len);
        for id in &ids {
            preimage.push('\n');
            preimage.push_str(&id.to_string());
        }

        Self(platform::crypto::sha256_hex(preimage.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
