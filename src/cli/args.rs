//! Command-line argument parsing for Gear Sync
//!
//! This module defines the CLI structure using clap derive macros: manifest
//! synchronization, index building, cache inspection and config management.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

/// Gear Sync - keep a local manifest store in step with the catalog
#[derive(Parser, Debug)]
#[command(
    name = "gear_sync",
    version,
    about = "Synchronize catalog item manifests and build a merged index",
    long_about = "Fetches item details from the catalog API (with an on-disk cache), writes one YAML
manifest per item into a sharded directory tree, and merges every manifest into a single index
sorted by identifier."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cache directory path
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Manifest tree root
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch details and write manifests for every identifier
    Sync(SyncArgs),

    /// Build the merged index from the manifest tree
    Index(IndexArgs),

    /// Cache inspection
    Cache(CacheArgs),

    /// Configuration file management
    Config(ConfigArgs),
}

/// Arguments for the sync command
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// JSON array of identifiers (defaults to the configured ids file)
    #[arg(long, value_name = "FILE")]
    pub ids: Option<PathBuf>,

    /// Items processed concurrently per batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Maximum number of identifiers to process (for testing)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Build the index after synchronizing
    #[arg(long)]
    pub index: bool,
}

/// Arguments for the index command
#[derive(Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// Index output path (defaults to the configured output)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for cache management
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache management actions
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache location, entry count and size
    Info,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a commented default configuration file
    Init {
        /// Destination (defaults to ./gear-sync.toml)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level requested by verbosity flags, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl GlobalArgs {
    /// Apply path overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(cache_dir) = &self.cache_dir {
            config.cache.cache_root = cache_dir.clone();
        }
        if let Some(root) = &self.root {
            config.sync.manifest_root = root.clone();
        }
    }
}

impl SyncArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == Some(0) {
            return Err("Batch size must be greater than 0".to_string());
        }

        if self.limit == Some(0) {
            return Err("Limit must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Apply overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(ids) = &self.ids {
            config.sync.ids_file = ids.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.sync.batch_size = batch_size;
        }
    }
}
