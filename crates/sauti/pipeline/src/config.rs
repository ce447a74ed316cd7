//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Queue, retry and worker-pool knobs.
///
/// Fixed at startup; nothing here is renegotiated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of concurrent worker slots.
    pub concurrency: usize,

    /// Attempts per job before it is marked failed.
    pub max_attempts: u32,

    /// Delay before the first retry; doubles per subsequent attempt.
    pub backoff_base: Duration,

    /// Completed job records retained for inspection.
    pub completed_retention: usize,

    /// Failed job records retained for inspection.
    pub failed_retention: usize,

    /// Bound of the in-flight channel between producers and workers.
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            completed_retention: 100,
            failed_retention: 50,
            queue_capacity: 1024,
        }
    }
}

impl PipelineConfig {
    /// Backoff before retrying after the given failed attempt (1-based).
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let config = PipelineConfig {
            backoff_base: Duration::from_millis(100),
            ..Default::default()
        };
        assert_eq!(config.backoff_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.backoff_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.backoff_for_attempt(3), Duration::from_millis(400));
    }
}
