//! Detail cache with read-through fetching
//!
//! The cache is durability-first: an existing, parseable entry is always used
//! and never revalidated. Only a miss (or an unparseable entry) reaches the
//! detail source, and the fetched body is persisted verbatim before it is
//! returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::app::atomic_write::write_atomic;
use crate::app::client::DetailSource;
use crate::app::models::RawDetails;
use crate::errors::SyncResult;

use super::config::CacheConfig;
use super::path::entry_path;
use super::stats::{CacheCounters, CacheStats};

/// Cache-or-fetch resolver for raw item details
pub struct DetailCache {
    /// Configuration
    config: CacheConfig,
    /// Where cache misses are fetched from
    source: Arc<dyn DetailSource>,
    /// Activity counters
    counters: CacheCounters,
}

impl std::fmt::Debug for DetailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailCache")
            .field("config", &self.config)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl DetailCache {
    /// Create a cache handle, creating the cache directory if needed
    ///
    /// Failing to create the directory is not fatal: reads will miss and
    /// writes will be logged as failures.
    pub async fn new(config: CacheConfig, source: Arc<dyn DetailSource>) -> Self {
        if config.write_entries {
            if let Err(e) = fs::create_dir_all(&config.cache_root).await {
                warn!(
                    "Could not create cache directory {}: {}",
                    config.cache_root.display(),
                    e
                );
            }
        }

        info!(
            "Initialized detail cache with root: {}",
            config.cache_root.display()
        );

        Self {
            config,
            source,
            counters: CacheCounters::default(),
        }
    }

    /// Get the cache root directory
    pub fn cache_root(&self) -> &Path {
        &self.config.cache_root
    }

    /// Get the cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Path of the entry for an identifier
    pub fn entry_path(&self, id: u64) -> PathBuf {
        entry_path(&self.config.cache_root, id)
    }

    /// Activity counters since this handle was created
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    /// Resolve raw details for an identifier
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Fetch` if there is no usable entry and the source
    /// fails, or `SyncError::MalformedResponse` if the fetched body is not a
    /// JSON object. Failing to persist the entry is logged, never returned.
    pub async fn resolve(&self, id: u64) -> SyncResult<RawDetails> {
        if let Some(details) = self.read_entry(id).await {
            self.counters.record_hit();
            debug!("Cache hit for {}", id);
            return Ok(details);
        }

        self.counters.record_miss();
        debug!("Cache miss for {}, fetching", id);

        let body = self.source.fetch_details(id).await?;
        let details = RawDetails::parse(id, &body)?;

        if self.config.write_entries {
            if let Err(e) = self.write_entry(id, &body).await {
                self.counters.record_write_failure();
                warn!(
                    "Failed to cache details for {} at {}: {}",
                    id,
                    self.entry_path(id).display(),
                    e
                );
            }
        }

        Ok(details)
    }

    /// Read and parse an entry; any problem is treated as a miss
    async fn read_entry(&self, id: u64) -> Option<RawDetails> {
        let path = self.entry_path(id);
        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Unreadable cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match RawDetails::parse(id, &text) {
            Ok(details) => Some(details),
            Err(e) => {
                self.counters.record_stale();
                warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Persist a body verbatim via temp file + rename
    async fn write_entry(&self, id: u64, body: &str) -> std::io::Result<()> {
        let final_path = self.entry_path(id);
        write_atomic(&final_path, body).await?;

        debug!("Cached details for {} at {}", id, final_path.display());
        Ok(())
    }
}
