//! Atomic file replacement
//!
//! Contents are written to a uniquely named sibling temp file and renamed over
//! the target, so readers see either the old file or the complete new one.
//! Every call gets its own temp name; two writers racing on the same target
//! both succeed and the last rename wins.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;

use crate::constants::files::TEMP_FILE_SUFFIX;

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Sibling temp path for `path`: `<name>.<pid>.<seq>.tmp`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let sequence = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(format!(".{}.{}{}", std::process::id(), sequence, TEMP_FILE_SUFFIX));
    path.with_file_name(name)
}

/// Replace `path` with `contents`
///
/// The parent directory must already exist. On failure the temp file is
/// removed and the target is left untouched.
pub async fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, contents).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }
    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_paths_are_unique_siblings() {
        let target = Path::new("/data/gears/manifest.yaml");
        let a = temp_path_for(target);
        let b = temp_path_for(target);

        assert_ne!(a, b);
        assert_eq!(a.parent(), target.parent());
        assert!(a.to_string_lossy().ends_with(".tmp"));
        assert!(a
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("manifest.yaml."));
    }

    #[tokio::test]
    async fn test_write_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out.yaml");

        write_atomic(&target, "first").await.unwrap();
        write_atomic(&target, "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "second");
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_writers_both_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("shared.json");

        let (a, b) = tokio::join!(write_atomic(&target, "{}"), write_atomic(&target, "{}"));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_missing_parent_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("missing").join("out.yaml");

        assert!(write_atomic(&target, "x").await.is_err());
        assert!(!target.exists());
    }
}
