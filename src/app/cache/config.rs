//! Cache configuration types and defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::cache;

/// Configuration for the detail cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one JSON entry per identifier
    pub cache_root: PathBuf,
    /// Persist freshly fetched bodies (disable for read-only runs)
    pub write_entries: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_root: PathBuf::from(cache::DEFAULT_CACHE_DIR),
            write_entries: true,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with custom cache root
    pub fn with_cache_root(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            ..Default::default()
        }
    }

    /// Enable or disable persisting fetched entries
    pub fn with_write_entries(mut self, enabled: bool) -> Self {
        self.write_entries = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.cache_root, PathBuf::from(".cache"));
        assert!(config.write_entries);
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::with_cache_root("/tmp/details").with_write_entries(false);
        assert_eq!(config.cache_root, PathBuf::from("/tmp/details"));
        assert!(!config.write_entries);
    }
}
