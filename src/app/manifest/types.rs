//! Manifest document and path types

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::app::hash::IdHash;
use crate::app::models::{parse_timestamp, Item, Tag};
use crate::constants::store::MANIFEST_FILE_NAME;
use crate::errors::{ManifestError, ManifestResult};

use super::slug::directory_name;

/// On-disk manifest body; field order is the serialized order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub id: u64,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

impl From<&Item> for ManifestDocument {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            created: item.created,
            updated: item.updated,
            name: item.name.clone(),
            description: item.description.clone(),
            tags: item.tags(),
        }
    }
}

impl ManifestDocument {
    /// Render the manifest as YAML
    pub fn to_yaml(&self) -> ManifestResult<String> {
        serde_yaml::to_string(self).map_err(|source| ManifestError::Serialize {
            id: self.id,
            source,
        })
    }
}

/// Timestamps are written as RFC 3339 UTC with millisecond precision
mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

/// Location of a manifest relative to the manifest root:
/// `<shard>/<slug>_<hash>/manifest.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestPath {
    shard: String,
    directory: String,
}

impl ManifestPath {
    /// Derive the path from an item's name and identifier
    ///
    /// Pure in `(name, id)`: the same pair always yields the same path.
    pub fn new(name: &str, id: u64) -> Self {
        let directory = directory_name(name, &IdHash::of(id));
        // directory is never empty: it ends in the 8-character hash
        let shard = directory.chars().take(1).collect();
        Self { shard, directory }
    }

    /// Path for an item
    pub fn for_item(item: &Item) -> Self {
        Self::new(&item.name, item.id)
    }

    /// One-letter shard directory
    pub fn shard(&self) -> &str {
        &self.shard
    }

    /// Item directory name (`<slug>_<hash>`)
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Item directory under `root`
    pub fn dir_under(&self, root: &Path) -> PathBuf {
        root.join(&self.shard).join(&self.directory)
    }

    /// Manifest file under `root`
    pub fn file_under(&self, root: &Path) -> PathBuf {
        self.dir_under(root).join(MANIFEST_FILE_NAME)
    }
}

impl std::fmt::Display for ManifestPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.shard, self.directory, MANIFEST_FILE_NAME)
    }
}
