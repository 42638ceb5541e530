//! Command handlers for the Gear Sync CLI
//!
//! Each handler receives the effective configuration (file values with CLI
//! overrides applied) and wires the core components together.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::cache::scan_usage;
use crate::app::{
    load_ids, CatalogClient, Coordinator, DetailCache, IndexBuilder, ManifestWriter, SyncReport,
};
use crate::cli::{
    CacheAction, CacheArgs, ConfigAction, ConfigArgs, IndexArgs, ProgressConfig, ProgressDisplay,
    SyncArgs,
};
use crate::config::AppConfig;
use crate::constants::config::LOCAL_CONFIG_FILE;
use crate::errors::{AppError, ConfigError, Result, SyncError};

/// Handle the sync command
///
/// Runs every identifier through cache, normalization and manifest writing,
/// optionally builds the index, and fails with `AppError::PartialSync` if any
/// item could not be synchronized.
pub async fn handle_sync(args: SyncArgs, mut config: AppConfig, quiet: bool) -> Result<()> {
    let start_time = Instant::now();

    args.validate().map_err(AppError::generic)?;
    args.apply_to(&mut config);
    config.validate()?;

    let mut ids = load_ids(&config.sync.ids_file).await?;
    if let Some(limit) = args.limit {
        ids.truncate(limit);
    }
    info!(
        "Loaded {} identifiers from {}",
        ids.len(),
        config.sync.ids_file.display()
    );

    let client = CatalogClient::with_config(&config.client).map_err(SyncError::from)?;
    let cache = Arc::new(DetailCache::new(config.cache.clone(), Arc::new(client)).await);
    let writer = ManifestWriter::new(&config.sync.manifest_root);

    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let display = ProgressDisplay::new(ProgressConfig {
        quiet,
        ..Default::default()
    })
    .spawn(progress_rx);

    let coordinator = Coordinator::new(config.coordinator_config(), cache.clone(), writer)
        .with_progress(progress_tx);
    let report = coordinator.run(&ids).await;

    // Closing the channel lets the display drain and exit
    drop(coordinator);
    display
        .await
        .map_err(|e| AppError::generic(format!("Progress display task panicked: {}", e)))?;

    if !quiet {
        print_sync_summary(&report, &cache);
    }

    if args.index {
        let summary = IndexBuilder::new(config.index_config()).write().await?;
        if !quiet {
            println!(
                "📚 Index: {} manifests written to {}",
                summary.manifests,
                summary.output.display()
            );
        }
    }

    info!("Sync command completed in {:?}", start_time.elapsed());

    if report.is_success() {
        Ok(())
    } else {
        warn!(
            "Synchronization completed with {} failures",
            report.failed
        );
        Err(AppError::PartialSync {
            failed: report.failed,
            total: report.total,
        })
    }
}

fn print_sync_summary(report: &SyncReport, cache: &DetailCache) {
    let stats = cache.stats();

    println!("\n📊 Sync Summary:");
    println!("  Total items: {}", report.total);
    println!("  Synchronized: {}", report.succeeded);
    println!("  Failed: {}", report.failed);
    println!("  Batches: {}", report.batches);
    println!(
        "  Cache: {} hits, {} fetched ({:.1}% hit rate)",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    );
    if stats.write_failures > 0 {
        println!("  Cache write failures: {}", stats.write_failures);
    }
    println!("  Time: {:.2?}", report.elapsed);
    println!("  Success rate: {:.1}%", report.success_rate());

    if !report.failures.is_empty() {
        println!("\nFailed items:");
        for failure in &report.failures {
            println!("  • {} [{}]: {}", failure.id, failure.category, failure.error);
        }
    }
}

/// Handle the index command
pub async fn handle_index(args: IndexArgs, mut config: AppConfig, quiet: bool) -> Result<()> {
    if let Some(output) = args.output {
        config.index.output = output;
    }

    let builder = IndexBuilder::new(config.index_config());
    let summary = builder.write().await?;

    if !quiet {
        println!("📚 Index Built");
        println!("=============");
        println!("Manifest root: {}", builder.config().manifest_root.display());
        println!("Manifests: {}", summary.manifests);
        println!("Output: {} ({} bytes)", summary.output.display(), summary.bytes);
    }

    Ok(())
}

/// Handle cache-related commands
pub async fn handle_cache(args: CacheArgs, config: AppConfig) -> Result<()> {
    match args.action {
        CacheAction::Info => handle_cache_info(config).await,
    }
}

/// Handle cache info display
async fn handle_cache_info(config: AppConfig) -> Result<()> {
    let usage = scan_usage(&config.cache.cache_root).await?;

    println!("💾 Cache Information");
    println!("===================");
    println!("Location: {}", usage.cache_root.display());
    println!("Cached entries: {}", usage.entries);
    println!(
        "Cache size: {:.1} KB",
        usage.total_bytes as f64 / 1024.0
    );

    Ok(())
}

/// Handle configuration commands
pub async fn handle_config(args: ConfigArgs, config: AppConfig) -> Result<()> {
    match args.action {
        ConfigAction::Init { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
            AppConfig::write_default(&path, force).await?;
            println!("📁 Created configuration file: {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let rendered = toml::to_string_pretty(&config).map_err(|e| {
                AppError::Config(ConfigError::InvalidValue {
                    field: "config".to_string(),
                    value: String::new(),
                    reason: e.to_string(),
                })
            })?;
            print!("{}", rendered);
            Ok(())
        }
    }
}
