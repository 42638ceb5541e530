//! Application constants for Gear Sync
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Catalog API configuration
pub mod catalog {
    /// Endpoint template for per-item details; `{id}` is replaced by the identifier
    pub const DETAILS_URL_TEMPLATE: &str = "https://economy.roproxy.com/v2/assets/{id}/details";

    /// Placeholder substituted in the endpoint template
    pub const ID_PLACEHOLDER: &str = "{id}";

    /// Payload field holding the display name
    pub const FIELD_NAME: &str = "Name";

    /// Payload field holding the description
    pub const FIELD_DESCRIPTION: &str = "Description";

    /// Payload field holding the on-sale flag
    pub const FIELD_ON_SALE: &str = "IsForSale";

    /// Payload field holding the creation timestamp
    pub const FIELD_CREATED: &str = "Created";

    /// Payload field holding the last update timestamp
    pub const FIELD_UPDATED: &str = "Updated";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("Gear-Sync/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
}

/// Detail cache constants
pub mod cache {
    /// Default cache directory, relative to the working directory
    pub const DEFAULT_CACHE_DIR: &str = ".cache";

    /// Extension of cache entry files
    pub const ENTRY_EXTENSION: &str = "json";
}

/// Manifest store layout
pub mod store {
    /// Default manifest tree root
    pub const DEFAULT_MANIFEST_ROOT: &str = "gears";

    /// File name of each manifest
    pub const MANIFEST_FILE_NAME: &str = "manifest.yaml";

    /// Glob of manifests relative to the root: shard letter, then item directory
    pub const MANIFEST_GLOB: &str = "*/*/manifest.yaml";

    /// Default merged index path
    pub const DEFAULT_INDEX_PATH: &str = "gears_index.yaml";

    /// Line separating documents in the merged index
    pub const DOCUMENT_SEPARATOR: &str = "---";

    /// Number of hex characters kept from the identifier digest
    pub const HASH_HEX_LEN: usize = 8;

    /// Tag applied when the item is on sale
    pub const TAG_ONSALE: &str = "Onsale";

    /// Tag applied when the item is off sale
    pub const TAG_OFFSALE: &str = "Offsale";
}

/// Batch orchestration
pub mod sync {
    /// Default number of identifiers processed concurrently per batch
    pub const DEFAULT_BATCH_SIZE: usize = 100;

    /// Default identifier list file
    pub const DEFAULT_IDS_FILE: &str = "ids.json";
}

/// File operation constants
pub mod files {
    /// Temporary file suffix for atomic operations
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";
}

/// Configuration file discovery
pub mod config {
    /// Project-local configuration file
    pub const LOCAL_CONFIG_FILE: &str = "gear-sync.toml";

    /// Directory name under the user config directory
    pub const APP_DIR_NAME: &str = "gear-sync";

    /// Configuration file name under the user config directory
    pub const USER_CONFIG_FILE: &str = "config.toml";
}

// Re-export commonly used constants for convenience
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use store::{DEFAULT_INDEX_PATH, DEFAULT_MANIFEST_ROOT, HASH_HEX_LEN};
pub use sync::DEFAULT_BATCH_SIZE;
