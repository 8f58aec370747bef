//! Application Configuration
//!
//! Configuration for the practice application layer.

use std::time::Duration;

/// Practice application configuration
#[derive(Debug, Clone)]
pub struct PracticeConfig {
    /// Age below which a cached generation result is served
    pub cache_ttl: Duration,
    /// Age above which the sweep removes a cached result
    pub sweep_ttl: Duration,
    /// How often the background sweep runs
    pub sweep_interval: Duration,
    /// Questions per page when the caller does not specify a limit
    pub default_question_limit: usize,
    /// Hard cap on questions per page
    pub max_question_limit: usize,
    /// How many leading questions of a new batch seed the covered-topics list
    pub topic_seed_count: usize,
    /// Cap on the context passed to the generator
    pub context_max_chars: usize,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(300),
            sweep_ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(600),
            default_question_limit: 5,
            max_question_limit: 25,
            topic_seed_count: 3,
            context_max_chars: 12_000,
        }
    }
}
