//! Spaced Repetition Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Scheduling algorithm, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Scheduling Model
//! - Each card carries its own SM-2 state (repetitions, ease factor, interval)
//! - The scheduling step is a pure function over caller-owned state
//! - Persistence serializes writes per card; the algorithm itself takes no locks

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ReviewConfig;
pub use error::{ReviewError, ReviewResult};
pub use infra::postgres::PgReviewRepository;
pub use presentation::router::review_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
