//! Identifier list input
//!
//! The list is a JSON array of positive integers, processed in file order.

use std::path::Path;

use tracing::debug;

use crate::errors::{ConfigError, ConfigResult};

/// Read the identifier list at `path`
pub async fn load_ids(path: &Path) -> ConfigResult<Vec<u64>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::IdListRead {
            path: path.to_path_buf(),
            source,
        })?;

    let ids: Vec<u64> = serde_json::from_str(&raw).map_err(|source| ConfigError::IdListFormat {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded {} identifiers from {}", ids.len(), path.display());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_preserves_order_and_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ids.json");
        std::fs::write(&path, "[11999247, 1, 11999247, 42]").unwrap();

        let ids = load_ids(&path).await.unwrap();
        assert_eq!(ids, vec![11999247, 1, 11999247, 42]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_ids(&temp_dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(ConfigError::IdListRead { .. })));
    }

    #[tokio::test]
    async fn test_rejects_non_integer_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ids.json");

        for body in [r#"["1", "2"]"#, "[-1]", "[1.5]", r#"{"ids": [1]}"#] {
            std::fs::write(&path, body).unwrap();
            let result = load_ids(&path).await;
            assert!(
                matches!(result, Err(ConfigError::IdListFormat { .. })),
                "{} should be rejected",
                body
            );
        }
    }
}
