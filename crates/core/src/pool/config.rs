//! Configuration for the worker pool.

use serde::{Deserialize, Serialize};

/// Configuration for the conversion worker pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of concurrent conversions.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Whether items skipped after a failure advance the progress count.
    #[serde(default = "default_count_skipped")]
    pub count_skipped_as_progress: bool,
}

fn default_concurrency() -> usize {
    8
}

fn default_count_skipped() -> bool {
    true
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            count_skipped_as_progress: default_count_skipped(),
        }
    }
}

impl PoolConfig {
    /// Sets the number of concurrent conversions.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets whether skipped items count toward progress.
    pub fn with_count_skipped(mut self, enabled: bool) -> Self {
        self.count_skipped_as_progress = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.concurrency, 8);
        assert!(config.count_skipped_as_progress);
    }

    #[test]
    fn test_config_builder() {
        let config = PoolConfig::default()
            .with_concurrency(2)
            .with_count_skipped(false);

        assert_eq!(config.concurrency, 2);
        assert!(!config.count_skipped_as_progress);
    }
}
