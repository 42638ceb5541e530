//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gear_sync::app::{
    CacheConfig, Coordinator, CoordinatorConfig, DetailCache, DetailSource, ManifestWriter,
};
use gear_sync::errors::{FetchError, FetchResult};
use tempfile::TempDir;

/// Raw details body in the catalog's response shape
pub fn details_body(name: &str, description: &str, on_sale: bool) -> String {
    serde_json::json!({
        "AssetId": 0,
        "Name": name,
        "Description": description,
        "IsForSale": on_sale,
        "Created": "2009-04-11T18:22:09.883Z",
        "Updated": "2015-06-01T10:00:00.5Z",
    })
    .to_string()
}

/// In-memory catalog. Identifiers without a body answer with HTTP 500.
#[derive(Default)]
pub struct MemoryCatalog {
    bodies: Mutex<HashMap<u64, String>>,
    calls: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding a generated item for every identifier
    pub fn with_generated(ids: impl IntoIterator<Item = u64>) -> Self {
        let catalog = Self::new();
        for id in ids {
            catalog.insert(
                id,
                details_body(&format!("Gear Number {}", id), "Generated", id % 3 == 0),
            );
        }
        catalog
    }

    pub fn insert(&self, id: u64, body: String) {
        self.bodies.lock().unwrap().insert(id, body);
    }

    pub fn remove(&self, id: u64) {
        self.bodies.lock().unwrap().remove(&id);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailSource for MemoryCatalog {
    async fn fetch_details(&self, id: u64) -> FetchResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so items in a batch genuinely interleave
        tokio::task::yield_now().await;
        let body = self.bodies.lock().unwrap().get(&id).cloned();
        body.ok_or(FetchError::ServerError { id, status: 500 })
    }
}

/// Workspace with cache, manifest root and index path under one temp dir
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn cache_root(&self) -> PathBuf {
        self.dir.path().join(".cache")
    }

    pub fn manifest_root(&self) -> PathBuf {
        self.dir.path().join("gears")
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.path().join("gears_index.yaml")
    }

    pub async fn coordinator(&self, catalog: Arc<MemoryCatalog>, batch_size: usize) -> Coordinator {
        let cache = DetailCache::new(CacheConfig::with_cache_root(self.cache_root()), catalog).await;
        Coordinator::new(
            CoordinatorConfig::default().with_batch_size(batch_size),
            Arc::new(cache),
            ManifestWriter::new(self.manifest_root()),
        )
    }

    /// Every manifest file currently in the tree
    pub fn manifests(&self) -> Vec<PathBuf> {
        list_manifests(&self.manifest_root())
    }
}

pub fn list_manifests(root: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/*/*/manifest.yaml", root.display());
    let mut found: Vec<PathBuf> = glob::glob(&pattern)
        .unwrap()
        .map(|entry| entry.unwrap())
        .collect();
    found.sort();
    found
}
