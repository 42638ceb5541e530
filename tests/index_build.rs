//! Index builder tests over hand-written manifest trees

mod common;

use std::path::Path;

use gear_sync::app::{IndexBuilder, IndexConfig};
use gear_sync::errors::IndexError;

use common::Workspace;

fn put(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn builder(workspace: &Workspace) -> IndexBuilder {
    IndexBuilder::new(IndexConfig::new(
        workspace.manifest_root(),
        workspace.index_path(),
    ))
}

#[tokio::test]
async fn test_index_orders_by_id_across_shards() {
    let workspace = Workspace::new();
    let root = workspace.manifest_root();
    put(&root, "z/zed_aaaa0001/manifest.yaml", "id: 1\nname: Zed\n");
    put(&root, "a/apple_aaaa0002/manifest.yaml", "id: 30\nname: Apple\n");
    put(&root, "m/mango_aaaa0003/manifest.yaml", "id: 200\nname: Mango\n");
    put(&root, "b/bob_aaaa0004/manifest.yaml", "id: 4\nname: Bob\n");

    let index = builder(&workspace).build().await.unwrap();
    assert_eq!(
        index,
        "id: 1\nname: Zed\n---\nid: 4\nname: Bob\n---\nid: 30\nname: Apple\n---\nid: 200\nname: Mango\n"
    );
}

#[tokio::test]
async fn test_rebuild_is_byte_stable() {
    let workspace = Workspace::new();
    let root = workspace.manifest_root();
    for id in [9u64, 3, 27, 81, 1] {
        put(
            &root,
            &format!("g/gear_{}/manifest.yaml", id),
            &format!("id: {}\nname: Gear {}\n", id, id),
        );
    }

    let builder = builder(&workspace);
    builder.write().await.unwrap();
    let first = std::fs::read(workspace.index_path()).unwrap();
    builder.write().await.unwrap();
    let second = std::fs::read(workspace.index_path()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_corrupt_manifest_keeps_previous_index() {
    let workspace = Workspace::new();
    let root = workspace.manifest_root();
    put(&root, "g/good_1/manifest.yaml", "id: 1\n");

    let builder = builder(&workspace);
    builder.write().await.unwrap();
    let before = std::fs::read(workspace.index_path()).unwrap();

    put(&root, "c/corrupt_2/manifest.yaml", "id: 2\nname: [half written\n");
    let result = builder.write().await;

    assert!(matches!(result, Err(IndexError::Parse { .. })));
    assert_eq!(std::fs::read(workspace.index_path()).unwrap(), before);
}

#[tokio::test]
async fn test_missing_root_builds_empty_index() {
    let workspace = Workspace::new();

    let summary = builder(&workspace).write().await.unwrap();
    assert_eq!(summary.manifests, 0);
    assert_eq!(std::fs::read_to_string(workspace.index_path()).unwrap(), "");
}
