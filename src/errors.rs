//! Error types for Gear Sync
//!
//! This module defines the error types for every stage of the pipeline.
//! Per-item errors (fetching, validation, manifest writes) are isolated by the
//! coordinator and recorded in the sync report; index and configuration errors
//! fail the whole operation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors retrieving raw details from the remote catalog
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport failure (connect, timeout, body read)
    #[error("HTTP request for item {id} failed")]
    Http {
        id: u64,
        #[source]
        source: reqwest::Error,
    },

    /// Server returned a non-success status
    #[error("Catalog returned HTTP {status} for item {id}")]
    ServerError { id: u64, status: u16 },

    /// The endpoint template produced an unusable URL
    #[error("Invalid catalog URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Source has no record for the identifier
    #[error("No details available for item {id}")]
    NotFound { id: u64 },
}

/// Errors validating a raw detail record at the typed boundary
#[derive(Error, Debug)]
pub enum MalformedResponseError {
    /// Body could not be parsed as JSON
    #[error("Response for item {id} is not valid JSON")]
    InvalidJson {
        id: u64,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON document is not an object
    #[error("Response for item {id} is not a JSON object")]
    NotAnObject { id: u64 },

    /// Required field absent
    #[error("Details for item {id} didn't provide the {field} field")]
    MissingField { id: u64, field: &'static str },

    /// Required field present with the wrong primitive type
    #[error("Details for item {id} have an invalid {field} field: expected {expected}")]
    InvalidField {
        id: u64,
        field: &'static str,
        expected: &'static str,
    },

    /// Required text field is empty
    #[error("Details for item {id} have an empty {field} field")]
    EmptyField { id: u64, field: &'static str },

    /// Timestamp field could not be parsed
    #[error("Details for item {id} have an unparseable {field} timestamp: {value}")]
    InvalidTimestamp {
        id: u64,
        field: &'static str,
        value: String,
    },
}

/// Manifest writing errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Shard or item directory could not be created
    #[error("Failed to create manifest directory: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be serialized
    #[error("Failed to serialize manifest for item {id}")]
    Serialize {
        id: u64,
        #[source]
        source: serde_yaml::Error,
    },

    /// Manifest file could not be written
    #[error("Failed to write manifest: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Index building errors
#[derive(Error, Debug)]
pub enum IndexError {
    /// Glob pattern could not be compiled
    #[error("Invalid manifest pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Manifest root cannot be expressed as a glob pattern
    #[error("Manifest root is not valid UTF-8: {}", path.display())]
    NonUtf8Root { path: PathBuf },

    /// Directory entry could not be inspected during discovery
    #[error("Failed to enumerate manifests")]
    Enumerate(#[from] glob::GlobError),

    /// Manifest could not be read
    #[error("Failed to read manifest: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest exists but is not valid structured data
    #[error("Failed to parse manifest: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Merged index could not be written
    #[error("Failed to write index: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single item during synchronization
#[derive(Error, Debug)]
pub enum SyncError {
    /// Details could not be retrieved
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Details were retrieved but failed validation
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),

    /// Manifest could not be persisted
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl SyncError {
    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            SyncError::Fetch(_) => "fetch",
            SyncError::MalformedResponse(_) => "malformed",
            SyncError::Manifest(_) => "io",
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be written
    #[error("Failed to write configuration file: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Identifier list could not be read
    #[error("Failed to read identifier list: {path}")]
    IdListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Identifier list is not a JSON array of integers
    #[error("Identifier list is not a JSON array of integers: {path}")]
    IdListFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Per-item synchronization error
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Index error
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Some items failed during a sync run
    #[error("{failed} of {total} items failed to synchronize")]
    PartialSync { failed: usize, total: usize },

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if re-running the same command could succeed without changes
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Sync(SyncError::Fetch(FetchError::Http { .. }))
            | AppError::Sync(SyncError::Fetch(FetchError::ServerError { .. }))
            | AppError::PartialSync { .. } => true,

            AppError::Sync(SyncError::MalformedResponse(_))
            | AppError::Index(IndexError::Parse { .. })
            | AppError::Config(_) => false,

            _ => false,
        }
    }

    /// Suggestion printed alongside a recoverable error
    pub fn retry_hint(&self) -> Option<&'static str> {
        if !self.is_recoverable() {
            return None;
        }
        match self {
            AppError::PartialSync { .. } => {
                Some("Re-run sync to retry the failed items; cached entries are reused")
            }
            _ => Some("The catalog may be temporarily unavailable; try again later"),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Sync(e) => e.category(),
            AppError::Index(_) => "index",
            AppError::Config(_) => "config",
            AppError::PartialSync { .. } => "sync",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Validation result type alias
pub type ValidationResult<T> = std::result::Result<T, MalformedResponseError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Index result type alias
pub type IndexResult<T> = std::result::Result<T, IndexError>;

/// Sync result type alias
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_categories() {
        let fetch: SyncError = FetchError::ServerError { id: 1, status: 404 }.into();
        let malformed: SyncError = MalformedResponseError::MissingField { id: 1, field: "Name" }.into();

        assert_eq!(fetch.category(), "fetch");
        assert_eq!(malformed.category(), "malformed");
        assert_eq!(AppError::Sync(fetch).category(), "fetch");
    }

    #[test]
    fn test_recoverability() {
        let server: AppError = SyncError::from(FetchError::ServerError { id: 7, status: 503 }).into();
        assert!(server.is_recoverable());

        let partial = AppError::PartialSync { failed: 1, total: 10 };
        assert!(partial.is_recoverable());
        assert_eq!(partial.to_string(), "1 of 10 items failed to synchronize");

        let malformed: AppError =
            SyncError::from(MalformedResponseError::EmptyField { id: 7, field: "Name" }).into();
        assert!(!malformed.is_recoverable());
    }

    #[test]
    fn test_retry_hint_only_for_recoverable() {
        let partial = AppError::PartialSync { failed: 2, total: 5 };
        assert!(partial.retry_hint().unwrap().contains("Re-run sync"));

        let server: AppError = SyncError::from(FetchError::ServerError { id: 7, status: 503 }).into();
        assert!(server.retry_hint().is_some());

        let config = AppError::Config(ConfigError::NotFound {
            path: PathBuf::from("missing.toml"),
        });
        assert_eq!(config.retry_hint(), None);
        assert_eq!(AppError::generic("boom").retry_hint(), None);
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = MalformedResponseError::MissingField {
            id: 11,
            field: "IsForSale",
        };
        assert_eq!(
            err.to_string(),
            "Details for item 11 didn't provide the IsForSale field"
        );
    }
}
