//! Batch orchestration of a synchronization run
//!
//! Identifiers are processed in fixed-size batches. Items inside a batch are
//! resolved concurrently; the next batch starts only after every item of the
//! current one has settled. A failing item is recorded in the report and never
//! stops its siblings or later batches.
//!
//! - [`config`] - [`CoordinatorConfig`]
//! - [`stats`] - [`SyncReport`] and [`ItemFailure`]
//! - [`progress`] - [`ProgressEvent`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gear_sync::app::{
//!     CacheConfig, CatalogClient, Coordinator, CoordinatorConfig, DetailCache, ManifestWriter,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(CatalogClient::new()?);
//! let cache = Arc::new(DetailCache::new(CacheConfig::default(), client).await);
//! let writer = ManifestWriter::new("gears");
//!
//! let coordinator = Coordinator::new(CoordinatorConfig::default(), cache, writer);
//! let report = coordinator.run(&[125861676, 11999247]).await;
//! println!("{} of {} synchronized", report.succeeded, report.total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod progress;
pub mod stats;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::cache::DetailCache;
use crate::app::manifest::ManifestWriter;
use crate::app::models::Item;
use crate::errors::SyncResult;

pub use config::CoordinatorConfig;
pub use progress::ProgressEvent;
pub use stats::{ItemFailure, SyncReport};

/// Drives the cache, normalization and manifest writer over an identifier list
pub struct Coordinator {
    config: CoordinatorConfig,
    cache: Arc<DetailCache>,
    writer: ManifestWriter,
    progress: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig, cache: Arc<DetailCache>, writer: ManifestWriter) -> Self {
        Self {
            config,
            cache,
            writer,
            progress: None,
        }
    }

    /// Send progress events to `tx` while running
    pub fn with_progress(mut self, tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        self.progress = Some(tx);
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }

    pub fn writer(&self) -> &ManifestWriter {
        &self.writer
    }

    /// Synchronize every identifier, batch by batch
    ///
    /// Never fails as a whole; per-item failures are collected in the report.
    pub async fn run(&self, ids: &[u64]) -> SyncReport {
        let start = Instant::now();
        // A zero batch size is rejected by validation; treat it as one here
        let batch_size = self.config.batch_size.max(1);
        let batches = ids.len().div_ceil(batch_size);
        let mut report = SyncReport {
            total: ids.len(),
            ..Default::default()
        };

        info!(
            "Synchronizing {} items in {} batches of up to {}",
            ids.len(),
            batches,
            batch_size
        );
        self.emit(ProgressEvent::Started {
            total: ids.len(),
            batches,
        });

        let mut processed = 0;
        for (index, batch) in ids.chunks(batch_size).enumerate() {
            let results = join_all(batch.iter().map(|&id| self.process_item(id))).await;

            for (&id, result) in batch.iter().zip(results) {
                match result {
                    Ok(path) => {
                        report.succeeded += 1;
                        debug!("Synchronized {} to {}", id, path.display());
                    }
                    Err(e) => {
                        let failure = ItemFailure::new(id, &e);
                        warn!("Failed to synchronize {}: {}", id, failure.error);
                        self.emit(ProgressEvent::ItemFailed {
                            id,
                            error: failure.error.clone(),
                        });
                        report.record_failure(failure);
                    }
                }
            }

            processed += batch.len();
            report.batches += 1;
            debug!("Processed {} of {}", processed, ids.len());
            self.emit(ProgressEvent::BatchCompleted {
                batch: index + 1,
                processed,
                total: ids.len(),
            });
        }

        report.elapsed = start.elapsed();
        info!(
            "Synchronization finished: {} succeeded, {} failed in {:.2?}",
            report.succeeded, report.failed, report.elapsed
        );
        report
    }

    /// Resolve, normalize and persist one item
    pub async fn process_item(&self, id: u64) -> SyncResult<PathBuf> {
        let details = self.cache.resolve(id).await?;
        let item = Item::from_details(&details)?;
        let path = self.writer.write(&item).await?;
        Ok(path)
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.progress {
            // Listener may have gone away; the run does not depend on it
            let _ = tx.send(event);
        }
    }
}
