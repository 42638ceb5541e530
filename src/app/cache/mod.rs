//! Detail cache
//!
//! One verbatim JSON file per identifier under an explicit cache root. Entries
//! are created on the first successful fetch, read on every later run, and
//! never expired: refreshing an item means deleting its entry.
//!
//! # Module Organization
//!
//! - [`config`] - Configuration types and defaults
//! - [`path`] - Entry path generation
//! - [`stats`] - Activity counters and disk usage
//! - [`manager`] - The read-through [`DetailCache`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gear_sync::app::cache::{CacheConfig, DetailCache};
//! use gear_sync::app::client::CatalogClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(CatalogClient::new()?);
//! let cache = DetailCache::new(CacheConfig::with_cache_root(".cache"), client).await;
//!
//! let details = cache.resolve(125861676).await?;
//! println!("Name field: {:?}", details.get("Name"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod path;
pub mod stats;

// Re-export main public API
pub use config::CacheConfig;
pub use manager::DetailCache;
pub use path::entry_path;
pub use stats::{scan_usage, CacheStats, CacheUsage};
