//! Practice Generation Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entities, request fingerprints, generator capability
//! - `application/` - Use cases
//! - `infra/` - Database implementations, coalescer, upstream client
//! - `presentation/` - HTTP handlers
//!
//! ## Delivery Model
//! - Concurrent generation requests with the same fingerprint run the
//!   underlying generation exactly once; completed results are reusable
//!   for a short window
//! - A practice session never delivers the same question twice; per-session
//!   mutation is serialized through a keyed lock
//! - Generator failures are surfaced to the caller and leave no partial
//!   state behind, so retries are always safe

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PracticeConfig;
pub use domain::generator::{GeneratedBatch, GenerationError, QuestionGenerator};
pub use error::{PracticeError, PracticeResult};
pub use infra::coalescer::GenerationCoalescer;
pub use infra::http_generator::HttpQuestionGenerator;
pub use infra::postgres::PgPracticeRepository;
pub use presentation::router::practice_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};
