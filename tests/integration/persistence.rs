//! Saving and loading whole stores

use crate::integration::test_utils::{dated_catalog, write};
use disc_catalog::search::find_all_fuzzy;
use disc_catalog::store::persistence;
use disc_catalog::{CatalogBuilder, CatalogError, CatalogStore, RecoveryPolicy};
use std::fs;
use tempfile::TempDir;

fn store() -> CatalogStore {
    let mut store = CatalogStore::new();
    store.add(dated_catalog("Backup 2023", "C:", &["docs/report.txt", "docs/report1.txt"]));
    store.add(dated_catalog("Photos", "D:", &["2019/beach.jpg"]));
    store.add(dated_catalog("Photos", "E:", &[]));
    store
}

#[test]
fn store_round_trips_through_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalogs.json");

    let original = store();
    original.save(&path).unwrap();
    let loaded = CatalogStore::load(&path, RecoveryPolicy::Fail).unwrap();

    assert_eq!(loaded.names(), vec!["Backup 2023", "Photos", "Photos"]);
    let original: Vec<_> = original.catalogs().cloned().collect();
    let loaded: Vec<_> = loaded.catalogs().cloned().collect();
    assert_eq!(original, loaded);
}

#[test]
fn saving_twice_replaces_the_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalogs.json");

    let mut store = store();
    store.save(&path).unwrap();
    let (id, _) = store.find_by_name("Backup 2023").unwrap();
    store.remove(id);
    store.save(&path).unwrap();

    let loaded = CatalogStore::load(&path, RecoveryPolicy::Fail).unwrap();
    assert_eq!(loaded.names(), vec!["Photos", "Photos"]);
}

#[test]
fn missing_document_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let loaded =
        CatalogStore::load(&temp_dir.path().join("none.json"), RecoveryPolicy::Fail).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn truncated_document_follows_policy() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalogs.json");
    let text = persistence::encode_to_string(store().catalogs()).unwrap();
    fs::write(&path, &text[..text.len() / 2]).unwrap();

    let failed = CatalogStore::load(&path, RecoveryPolicy::Fail);
    assert!(matches!(
        failed,
        Err(CatalogError::MalformedDocument { path: p, .. }) if p == path
    ));

    // A truncated array cannot be split into entries
    assert!(CatalogStore::load(&path, RecoveryPolicy::SkipCorruptEntries).is_err());

    let reset = CatalogStore::load(&path, RecoveryPolicy::ResetToEmpty).unwrap();
    assert!(reset.is_empty());
}

#[test]
fn corrupt_entry_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalogs.json");

    let text = persistence::encode_to_string(store().catalogs()).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
    value[1]["root"]["kind"] = serde_json::Value::String("symlink".to_string());
    fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let loaded = CatalogStore::load(&path, RecoveryPolicy::SkipCorruptEntries).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.names(), vec!["Backup 2023", "Photos"]);
}

#[test]
fn deeply_nested_scan_reloads() {
    let volume = TempDir::new().unwrap();
    let nested = vec!["d"; 150].join("/");
    write(volume.path(), &format!("{}/bottom.txt", nested));

    let catalog = CatalogBuilder::new("deep", volume.path().to_path_buf())
        .build()
        .unwrap()
        .catalog;
    assert_eq!(catalog.stats().directories, 151);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalogs.json");
    let mut store = CatalogStore::new();
    store.add(catalog.clone());
    store.save(&path).unwrap();

    let mut loaded = CatalogStore::load(&path, RecoveryPolicy::Fail).unwrap();
    assert_eq!(loaded.catalogs().cloned().collect::<Vec<_>>(), vec![catalog]);

    // A reloaded deep store can still be changed and saved
    let (id, deep) = loaded.find_by_name("deep").unwrap();
    assert_eq!(find_all_fuzzy(deep, "bottom.txt").len(), 1);
    loaded.remove(id);
    loaded.save(&path).unwrap();
    assert!(CatalogStore::load(&path, RecoveryPolicy::Fail).unwrap().is_empty());
}
