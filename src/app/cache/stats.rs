//! Cache statistics
//!
//! Runtime counters are updated lock-free from concurrently processed items;
//! [`CacheUsage`] is an on-disk snapshot produced by scanning the cache root.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::path::id_from_entry_path;

/// Live counters for one cache handle
#[derive(Debug, Default)]
pub struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    stale_entries: AtomicU64,
    write_failures: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stale(&self) {
        self.stale_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a consistent-enough snapshot for reporting
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale_entries: self.stale_entries.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of cache activity during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups served from disk
    pub hits: u64,
    /// Lookups that went to the network
    pub misses: u64,
    /// Entries present but unparseable, refetched
    pub stale_entries: u64,
    /// Fetched bodies that could not be persisted
    pub write_failures: u64,
}

impl CacheStats {
    /// Fraction of lookups served from disk
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

/// On-disk usage of the cache directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheUsage {
    /// Scanned directory
    pub cache_root: PathBuf,
    /// Number of entry files
    pub entries: usize,
    /// Total size of entry files in bytes
    pub total_bytes: u64,
}

/// Count entries and bytes under the cache root
///
/// A missing root is reported as an empty cache.
pub async fn scan_usage(cache_root: &Path) -> std::io::Result<CacheUsage> {
    let mut usage = CacheUsage {
        cache_root: cache_root.to_path_buf(),
        ..Default::default()
    };

    let mut dir = match fs::read_dir(cache_root).await {
        Ok(dir) => dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(usage),
        Err(e) => return Err(e),
    };

    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if id_from_entry_path(&path).is_none() {
            continue;
        }
        let metadata = entry.metadata().await?;
        if metadata.is_file() {
            usage.entries += 1;
            usage.total_bytes += metadata.len();
        }
    }

    debug!(
        "Scanned cache {}: {} entries, {} bytes",
        cache_root.display(),
        usage.entries,
        usage.total_bytes
    );
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_counters_snapshot() {
        let counters = CacheCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        counters.record_write_failure();

        let stats = counters.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stale_entries, 0);
        assert_eq!(stats.write_failures, 1);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_scan_usage_counts_only_entries() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("1.json"), "{}").unwrap();
        std::fs::write(temp_dir.path().join("2.json"), "{\"a\":1}").unwrap();
        std::fs::write(temp_dir.path().join("3.json.tmp"), "partial").unwrap();
        std::fs::write(temp_dir.path().join("README"), "ignored").unwrap();

        let usage = scan_usage(temp_dir.path()).await.unwrap();
        assert_eq!(usage.entries, 2);
        assert_eq!(usage.total_bytes, 9);
    }

    #[tokio::test]
    async fn test_scan_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let usage = scan_usage(&temp_dir.path().join("absent")).await.unwrap();
        assert_eq!(usage.entries, 0);
        assert_eq!(usage.total_bytes, 0);
    }
}
