//! Cache entry path generation
//!
//! Entries live flat under the cache root, one file per identifier:
//! `{cache_root}/{id}.json`.

use std::path::{Path, PathBuf};

use crate::constants::cache::ENTRY_EXTENSION;

/// Path of the cache entry for an identifier
pub fn entry_path(cache_root: &Path, id: u64) -> PathBuf {
    cache_root.join(format!("{}.{}", id, ENTRY_EXTENSION))
}

/// Recover the identifier from an entry path, ignoring temp files and strays
pub fn id_from_entry_path(path: &Path) -> Option<u64> {
    if path.extension()?.to_str()? != ENTRY_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}
