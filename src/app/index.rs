//! Merged manifest index
//!
//! The index is fully derived: every build discovers all manifests under the
//! root, orders them by identifier and concatenates the raw bodies, separated
//! by `---` lines. Nothing is written unless every manifest parses.

use std::path::PathBuf;

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};

use crate::app::atomic_write::write_atomic;
use crate::constants::store;
use crate::errors::{IndexError, IndexResult};

/// Index builder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Root of the manifest tree
    pub manifest_root: PathBuf,
    /// Where the merged index is written
    pub output: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            manifest_root: PathBuf::from(store::DEFAULT_MANIFEST_ROOT),
            output: PathBuf::from(store::DEFAULT_INDEX_PATH),
        }
    }
}

impl IndexConfig {
    pub fn new(manifest_root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            manifest_root: manifest_root.into(),
            output: output.into(),
        }
    }
}

/// Only the identifier is needed for ordering
#[derive(Debug, Deserialize)]
struct ManifestHeader {
    id: u64,
}

/// A discovered manifest with its sort key
#[derive(Debug)]
struct IndexEntry {
    id: u64,
    path: PathBuf,
    body: String,
}

/// Summary of a written index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub manifests: usize,
    pub bytes: usize,
    pub output: PathBuf,
}

/// Builds the merged index over a manifest tree
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Glob pattern matching every manifest under the root
    fn pattern(&self) -> IndexResult<String> {
        let root = self
            .config
            .manifest_root
            .to_str()
            .ok_or_else(|| IndexError::NonUtf8Root {
                path: self.config.manifest_root.clone(),
            })?;
        let root = glob::Pattern::escape(root);
        Ok(format!("{}/{}", root.trim_end_matches('/'), store::MANIFEST_GLOB))
    }

    /// Find every manifest path under the root
    pub fn discover(&self) -> IndexResult<Vec<PathBuf>> {
        let pattern = self.pattern()?;
        let paths = glob::glob(&pattern).map_err(|source| IndexError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut found = Vec::new();
        for path in paths {
            found.push(path?);
        }
        debug!("Discovered {} manifests with {}", found.len(), pattern);
        Ok(found)
    }

    async fn load_entries(&self) -> IndexResult<Vec<IndexEntry>> {
        let mut entries = Vec::new();
        for path in self.discover()? {
            let body = fs::read_to_string(&path)
                .await
                .map_err(|source| IndexError::Read {
                    path: path.clone(),
                    source,
                })?;
            let header: ManifestHeader =
                serde_yaml::from_str(&body).map_err(|source| IndexError::Parse {
                    path: path.clone(),
                    source,
                })?;
            entries.push(IndexEntry {
                id: header.id,
                path,
                body,
            });
        }

        // Path as tie-breaker keeps duplicate ids in a stable order
        entries.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
        Ok(entries)
    }

    /// Assemble the merged index in memory
    ///
    /// # Errors
    ///
    /// Aborts with `IndexError::Parse` on the first manifest that is not valid
    /// YAML with a numeric `id`.
    pub async fn build(&self) -> IndexResult<String> {
        let entries = self.load_entries().await?;
        Ok(merge_bodies(entries.iter().map(|entry| entry.body.as_str())))
    }

    /// Build the index and replace the output file with it
    pub async fn write(&self) -> IndexResult<IndexSummary> {
        let entries = self.load_entries().await?;
        let merged = merge_bodies(entries.iter().map(|entry| entry.body.as_str()));
        let output = &self.config.output;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| IndexError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        write_atomic(output, merged.as_bytes())
            .await
            .map_err(|source| IndexError::Write {
                path: output.clone(),
                source,
            })?;

        info!(
            "Wrote index of {} manifests to {}",
            entries.len(),
            output.display()
        );
        Ok(IndexSummary {
            manifests: entries.len(),
            bytes: merged.len(),
            output: output.clone(),
        })
    }
}

/// Join manifest bodies with document separators
///
/// A body without a trailing newline gets one so the separator always starts
/// its own line.
pub fn merge_bodies<'a>(bodies: impl IntoIterator<Item = &'a str>) -> String {
    let separator = format!("{}\n", store::DOCUMENT_SEPARATOR);
    let mut merged = String::new();
    for (i, body) in bodies.into_iter().enumerate() {
        if i > 0 {
            if !merged.ends_with('\n') {
                merged.push('\n');
            }
            merged.push_str(&separator);
        }
        merged.push_str(body);
    }
    merged
}
