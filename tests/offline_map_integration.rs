//! Integration tests for offline map directory management.
//!
//! These tests exercise the full directory lifecycle against a real
//! (temporary) filesystem:
//! - staging preparation before a download
//! - persisting and deleting a downloaded map
//! - the error surfaced when a map is deleted twice
//!
//! Run with: `cargo test --test offline_map_integration`

use std::fs;

use data_collection::offline_map::{OfflineMapError, OfflineMapStore};

/// Portal item ID of the web map used throughout.
const WEB_MAP_ITEM_ID: &str = "16f1b8ba37b44dc3884afc8d5f454dd2";

/// Build a store rooted inside a fresh temporary directory.
fn sandboxed_store() -> (tempfile::TempDir, OfflineMapStore) {
    let sandbox = tempfile::tempdir().expect("failed to create sandbox");
    let store = OfflineMapStore::new()
        .with_temp_root(sandbox.path().join("tmp"))
        .with_documents_root(sandbox.path().join("Documents"));
    (sandbox, store)
}

/// Simulate the download engine dropping a finished map into the
/// persisted directory.
fn install_fake_map(store: &OfflineMapStore, item_id: &str) {
    store.prepare_persisted_directory(item_id).unwrap();
    let dir = store.persisted_directory(item_id).unwrap();
    fs::write(dir.join("package.info"), b"{}").unwrap();
    fs::create_dir(dir.join("p13")).unwrap();
    fs::write(dir.join("p13").join("map.geodatabase"), b"payload").unwrap();
}

#[test]
fn test_download_staging_flow() {
    let (_sandbox, store) = sandboxed_store();

    // Before a download: ancestors exist, the leaf is left for the
    // download engine itself to create.
    store.prepare_temporary_directory(WEB_MAP_ITEM_ID).unwrap();
    let staging = store.temporary_directory(WEB_MAP_ITEM_ID).unwrap();
    assert!(staging.parent().unwrap().is_dir());
    assert!(!staging.exists());

    // The download engine creates the leaf and fills it, then crashes.
    fs::create_dir(&staging).unwrap();
    fs::write(staging.join("partial.download"), b"...").unwrap();

    // A retried download re-prepares; the stale leaf and its contents
    // must not survive.
    store.prepare_temporary_directory(WEB_MAP_ITEM_ID).unwrap();
    assert!(!staging.exists());
}

#[test]
fn test_persisted_map_lifecycle() {
    let (_sandbox, store) = sandboxed_store();

    install_fake_map(&store, WEB_MAP_ITEM_ID);
    let dir = store.persisted_directory(WEB_MAP_ITEM_ID).unwrap();
    assert!(dir.join("p13").join("map.geodatabase").is_file());

    store.delete_persisted_directory(WEB_MAP_ITEM_ID).unwrap();
    assert!(!dir.exists());

    // The namespace above the item remains usable.
    install_fake_map(&store, WEB_MAP_ITEM_ID);
    assert!(dir.is_dir());
}

#[test]
fn test_delete_twice_surfaces_error() {
    let (_sandbox, store) = sandboxed_store();

    install_fake_map(&store, WEB_MAP_ITEM_ID);
    store.delete_persisted_directory(WEB_MAP_ITEM_ID).unwrap();

    match store.delete_persisted_directory(WEB_MAP_ITEM_ID) {
        Err(OfflineMapError::Remove { path, source }) => {
            assert!(path.ends_with(WEB_MAP_ITEM_ID));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected Remove error, got {:?}", other),
    }
}

#[test]
fn test_items_are_isolated() {
    let (_sandbox, store) = sandboxed_store();

    install_fake_map(&store, WEB_MAP_ITEM_ID);
    install_fake_map(&store, "0ff7b04e94c4aa1a2f2f7dcdb6ab9fc0");

    store.delete_persisted_directory(WEB_MAP_ITEM_ID).unwrap();

    assert!(!store
        .persisted_directory(WEB_MAP_ITEM_ID)
        .unwrap()
        .exists());
    assert!(store
        .persisted_directory("0ff7b04e94c4aa1a2f2f7dcdb6ab9fc0")
        .unwrap()
        .is_dir());
}
