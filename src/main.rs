//! Gear Sync CLI application
//!
//! Command-line interface for synchronizing catalog item manifests and
//! building the merged index.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use gear_sync::cli::{handle_cache, handle_config, handle_index, handle_sync, Cli, Commands};
use gear_sync::config::AppConfig;
use gear_sync::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.retry_hint() {
            eprintln!("Hint: {}", hint);
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    let mut config = AppConfig::load(cli.global.config.clone()).await?;
    cli.global.apply_to(&mut config);

    init_logging(&cli, &config);

    info!("Gear Sync v{} starting", env!("CARGO_PKG_VERSION"));

    let quiet = cli.global.quiet;
    match cli.command {
        Commands::Sync(args) => {
            info!("Executing sync command");
            handle_sync(args, config, quiet).await
        }
        Commands::Index(args) => {
            info!("Executing index command");
            handle_index(args, config, quiet).await
        }
        Commands::Cache(args) => {
            info!("Executing cache command");
            handle_cache(args, config).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(args, config).await
        }
    }
}

/// Initialize logging from CLI verbosity, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let level = cli
        .log_level()
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| config.logging.level.to_lowercase());

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("gear_sync={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
