//! Application Configuration
//!
//! Configuration for the review application layer.

/// Review application configuration
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    /// Due-card page size when the caller does not specify one
    pub default_due_limit: u32,
    /// Hard cap on the due-card page size
    pub max_due_limit: u32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_due_limit: 20,
            max_due_limit: 200,
        }
    }
}
