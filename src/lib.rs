//! Gear Sync Library
//!
//! Synchronizes a local, content-addressed manifest store from the catalog
//! details API and builds a merged, identifier-sorted index over it.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
