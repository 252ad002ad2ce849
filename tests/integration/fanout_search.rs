//! Concurrent store: building and searching many catalogs at once

use crate::integration::test_utils::{dated_catalog, sample_volume};
use disc_catalog::{CatalogBuilder, SharedCatalogStore, SortOrder};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fuzzy_results_keep_catalog_order() {
    let store = SharedCatalogStore::new();
    let mut expected = Vec::new();
    for i in 0..16 {
        let files: Vec<String> = (0..=i).map(|n| format!("dir{}/report.txt", n)).collect();
        let files: Vec<&str> = files.iter().map(String::as_str).collect();
        let id = store.add(dated_catalog(&format!("disc{:02}", i), "/", &files));
        expected.push((id, i + 1));
    }

    let results = store.find_all_fuzzy_all("report1.txt").await.unwrap();
    let seen: Vec<_> = results
        .iter()
        .map(|r| (r.catalog_id, r.matches.len()))
        .collect();
    assert_eq!(seen, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_builds_then_search() {
    let first = sample_volume();
    let second = sample_volume();
    let store = SharedCatalogStore::new();

    let (a, b) = tokio::join!(
        store.build(CatalogBuilder::new("first", first.path().to_path_buf())),
        store.build(CatalogBuilder::new("second", second.path().to_path_buf())),
    );
    let (a, _) = a.unwrap();
    let (b, _) = b.unwrap();
    assert_eq!(store.len(), 2);

    let hits = store.find_first_all("song.mp3", None).await.unwrap();
    let mut ids: Vec<_> = hits.iter().map(|h| h.catalog_id).collect();
    ids.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn searches_see_sorted_trees() {
    let store = SharedCatalogStore::new();
    store.add(dated_catalog("disc", "/", &["b/notes.txt", "a/notes.txt"]));

    let before = store.find_first_all("notes.txt", None).await.unwrap();
    store.sort_all(SortOrder::Name).await.unwrap();
    let after = store.find_first_all("notes.txt", None).await.unwrap();

    // b/notes.txt was stamped first, a/notes.txt one day later
    assert!(before[0].node.timestamp < after[0].node.timestamp);
}
