//! Prelude module for Gear Sync
//!
//! Re-exports the items needed for typical library usage with a single
//! `use gear_sync::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gear_sync::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(CatalogClient::new().map_err(SyncError::from)?);
//!     let cache = Arc::new(DetailCache::new(CacheConfig::default(), client).await);
//!     let coordinator =
//!         Coordinator::new(CoordinatorConfig::default(), cache, ManifestWriter::new("gears"));
//!
//!     let report = coordinator.run(&[125861676]).await;
//!     println!("{} synchronized", report.succeeded);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result, SyncError};

// Essential app components
pub use crate::app::{
    load_ids,
    CacheConfig,
    CacheStats,
    CatalogClient,
    ClientConfig,
    // Core orchestration
    Coordinator,
    CoordinatorConfig,
    DetailCache,
    DetailSource,
    IdHash,
    IndexBuilder,
    IndexConfig,
    // Data types
    Item,
    ManifestPath,
    ManifestWriter,
    RawDetails,
    // Result types
    SyncReport,
    Tag,
};

pub use crate::config::AppConfig;
