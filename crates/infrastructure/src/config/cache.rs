//! Cache configuration with TTL settings.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Weather history cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TTL for fetched history in seconds (default: 6 hours)
    #[serde(default = "default_history_ttl")]
    pub history_ttl_secs: u64,

    /// Maximum number of cached history ranges
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_history_ttl() -> u64 {
    6 * 60 * 60 // 6 hours
}

const fn default_max_entries() -> u64 {
    1_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            history_ttl_secs: default_history_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Get the history TTL as a Duration
    #[must_use]
    pub const fn history_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.history_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.history_ttl().as_secs(), 21_600);
        assert_eq!(config.max_entries, 1_000);
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let config: CacheConfig = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.history_ttl_secs, 21_600);
    }
}
