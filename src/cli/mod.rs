//! Command-line interface components
//!
//! This module contains CLI-specific code for the Gear Sync application,
//! including argument parsing, command handlers and progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{
    CacheAction, CacheArgs, Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, IndexArgs,
    SyncArgs,
};
pub use commands::{handle_cache, handle_config, handle_index, handle_sync};
pub use progress::{ProgressConfig, ProgressDisplay};
