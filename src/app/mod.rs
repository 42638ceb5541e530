//! Core synchronization logic
//!
//! This module contains the identifier hasher, the typed item model, the
//! read-through detail cache, the manifest store, the batch coordinator and
//! the index builder.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gear_sync::app::{
//!     CacheConfig, CatalogClient, Coordinator, CoordinatorConfig, DetailCache, IndexBuilder,
//!     IndexConfig, ManifestWriter,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(CatalogClient::new()?);
//! let cache = Arc::new(DetailCache::new(CacheConfig::default(), client).await);
//!
//! let coordinator =
//!     Coordinator::new(CoordinatorConfig::default(), cache, ManifestWriter::new("gears"));
//! let report = coordinator.run(&[125861676]).await;
//!
//! if report.is_success() {
//!     IndexBuilder::new(IndexConfig::default()).write().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod atomic_write;
pub mod cache;
pub mod client;
pub mod coordinator;
pub mod hash;
pub mod ids;
pub mod index;
pub mod manifest;
pub mod models;

// Re-export main public API
pub use cache::{CacheConfig, CacheStats, CacheUsage, DetailCache};
pub use client::{CatalogClient, ClientConfig, DetailSource};
pub use coordinator::{Coordinator, CoordinatorConfig, ItemFailure, ProgressEvent, SyncReport};
pub use hash::IdHash;
pub use ids::load_ids;
pub use index::{IndexBuilder, IndexConfig, IndexSummary};
pub use manifest::{slugify_name, ManifestDocument, ManifestPath, ManifestWriter};
pub use models::{Item, RawDetails, Tag};
