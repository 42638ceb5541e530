//! Manifest persistence
//!
//! Every write replaces the whole file; nothing from a previous manifest is
//! merged in. Writes are atomic so a concurrent index build never reads half
//! a manifest.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::app::atomic_write::write_atomic;
use crate::app::models::Item;
use crate::errors::{ManifestError, ManifestResult};

use super::types::{ManifestDocument, ManifestPath};

/// Writes item manifests into the sharded store
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    root: PathBuf,
}

impl ManifestWriter {
    /// Create a writer for the store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Manifest tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the manifest for `item` lives
    pub fn manifest_path(&self, item: &Item) -> PathBuf {
        ManifestPath::for_item(item).file_under(&self.root)
    }

    /// Write (or overwrite) the manifest for an item
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` if the directory cannot be created, the document
    /// cannot be serialized, or the file cannot be written.
    pub async fn write(&self, item: &Item) -> ManifestResult<PathBuf> {
        let location = ManifestPath::for_item(item);
        let dir = location.dir_under(&self.root);
        let final_path = location.file_under(&self.root);

        fs::create_dir_all(&dir)
            .await
            .map_err(|source| ManifestError::CreateDir {
                path: dir.clone(),
                source,
            })?;

        let body = ManifestDocument::from(item).to_yaml()?;

        write_atomic(&final_path, body.as_bytes())
            .await
            .map_err(|source| ManifestError::Write {
                path: final_path.clone(),
                source,
            })?;

        debug!("Wrote manifest for {} to {}", item.id, final_path.display());
        Ok(final_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn item(id: u64, name: &str, on_sale: bool) -> Item {
        Item {
            id,
            name: name.to_string(),
            description: "A gear".to_string(),
            on_sale,
            created: Utc.with_ymd_and_hms(2009, 1, 1, 0, 0, 0).unwrap(),
            updated: Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_write_creates_sharded_layout() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(temp_dir.path().join("gears"));

        let path = writer.write(&item(1, "Bob's Sword", true)).await.unwrap();
        assert_eq!(
            path,
            temp_dir
                .path()
                .join("gears/b/bobs_sword_6b86b273/manifest.yaml")
        );

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("name: Bob's Sword"));
        assert!(body.contains("- Onsale"));
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_rewrite_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(temp_dir.path());
        let gear = item(77, "Linked Sword", false);

        let path = writer.write(&gear).await.unwrap();
        let first = std::fs::read(&path).unwrap();
        writer.write(&gear).await.unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_write_overwrites_without_merging() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(temp_dir.path());

        let path = writer.write(&item(5, "Sword", true)).await.unwrap();
        std::fs::write(&path, "id: 5\ntags:\n- Custom\n").unwrap();
        writer.write(&item(5, "Sword", false)).await.unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(!body.contains("Custom"));
        assert!(body.contains("- Offsale"));
    }

    #[tokio::test]
    async fn test_distinct_ids_get_distinct_paths() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(temp_dir.path());

        let a = writer.write(&item(100, "Sword", true)).await.unwrap();
        let b = writer.write(&item(101, "Sword", true)).await.unwrap();
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[tokio::test]
    async fn test_unwritable_root_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocked = temp_dir.path().join("blocked");
        std::fs::write(&blocked, "file").unwrap();
        let writer = ManifestWriter::new(&blocked);

        let result = writer.write(&item(1, "Sword", true)).await;
        assert!(matches!(result, Err(ManifestError::CreateDir { .. })));
    }
}
