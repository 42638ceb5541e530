//! Configuration management for Gear Sync
//!
//! Settings come from built-in defaults, then the first TOML file found in
//! the standard locations, then command-line flags (applied by the CLI).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{CacheConfig, ClientConfig, CoordinatorConfig, IndexConfig};
use crate::constants::{config as locations, store, sync};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Detail cache settings
    pub cache: CacheConfig,
    /// Catalog HTTP client settings
    pub client: ClientConfig,
    /// Synchronization run settings
    pub sync: SyncSection,
    /// Index output settings
    pub index: IndexSection,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// `[sync]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSection {
    /// Items processed concurrently per batch
    pub batch_size: usize,
    /// JSON array of identifiers to synchronize
    pub ids_file: PathBuf,
    /// Root of the manifest tree
    pub manifest_root: PathBuf,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            batch_size: sync::DEFAULT_BATCH_SIZE,
            ids_file: PathBuf::from(sync::DEFAULT_IDS_FILE),
            manifest_root: PathBuf::from(store::DEFAULT_MANIFEST_ROOT),
        }
    }
}

/// `[index]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSection {
    /// Merged index path
    pub output: PathBuf,
}

impl Default for IndexSection {
    fn default() -> Self {
        Self {
            output: PathBuf::from(store::DEFAULT_INDEX_PATH),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no verbosity flag or RUST_LOG is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Explicit `config_file_override` (must exist)
    /// 2. `./gear-sync.toml`
    /// 3. `<user config dir>/gear-sync/config.toml`
    /// 4. Built-in defaults
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        if let Some(path) = config_file_override {
            if !path.exists() {
                return Err(ConfigError::NotFound { path });
            }
            return Self::load_from_file(&path).await;
        }

        match Self::find_config_file(&Self::search_paths()) {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found in standard locations, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Standard config file locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".").join(locations::LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::user_config_path() {
            paths.push(path);
        }
        paths
    }

    /// Per-user config file path, when the platform has a config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(locations::APP_DIR_NAME)
                .join(locations::USER_CONFIG_FILE)
        })
    }

    fn find_config_file(candidates: &[PathBuf]) -> Option<PathBuf> {
        let found = candidates.iter().find(|path| path.is_file()).cloned();
        if let Some(path) = &found {
            debug!("Found config file: {}", path.display());
        }
        found
    }

    /// Load and validate configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sync.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.batch_size".to_string(),
                value: "0".to_string(),
                reason: "Batch size must be greater than 0".to_string(),
            });
        }

        self.client
            .validate()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "client".to_string(),
                value: self.client.url_template.clone(),
                reason,
            })?;

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Expected one of {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Coordinator settings for a run
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig::default().with_batch_size(self.sync.batch_size)
    }

    /// Index builder settings
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig::new(&self.sync.manifest_root, &self.index.output)
    }

    /// Default configuration file content with comments
    pub fn default_config_content() -> String {
        let defaults = Self::default();
        format!(
            r#"# Gear Sync Configuration
# Every setting is optional; missing values use the defaults shown here.

[cache]
# One JSON file per identifier; delete an entry to force a refetch
cache_root = "{cache_root}"
write_entries = true

[client]
# Details endpoint, {{id}} is replaced by the item identifier
url_template = "{url_template}"
request_timeout = "{request_timeout}"
connect_timeout = "{connect_timeout}"
user_agent = "{user_agent}"

[sync]
batch_size = {batch_size}
ids_file = "{ids_file}"
manifest_root = "{manifest_root}"

[index]
output = "{output}"

[logging]
level = "{level}"  # error, warn, info, debug, trace
"#,
            cache_root = defaults.cache.cache_root.display(),
            url_template = defaults.client.url_template,
            request_timeout = format!("{}s", defaults.client.request_timeout.as_secs()),
            connect_timeout = format!("{}s", defaults.client.connect_timeout.as_secs()),
            user_agent = defaults.client.user_agent,
            batch_size = defaults.sync.batch_size,
            ids_file = defaults.sync.ids_file.display(),
            manifest_root = defaults.sync.manifest_root.display(),
            output = defaults.index.output.display(),
            level = defaults.logging.level,
        )
    }

    /// Write the default configuration to `path`, refusing to overwrite
    /// unless `force` is set
    pub async fn write_default(path: &Path, force: bool) -> ConfigResult<()> {
        if path.exists() && !force {
            return Err(ConfigError::InvalidValue {
                field: "path".to_string(),
                value: path.display().to_string(),
                reason: "File already exists (use --force to overwrite)".to_string(),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, Self::default_config_content())
            .await
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}
