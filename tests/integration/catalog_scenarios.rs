//! End-to-end behavior of one catalog: insertion, sorting and both searches

use crate::integration::test_utils::{dated_catalog, ts};
use disc_catalog::search::{find_all_fuzzy, find_first, find_first_within, DateRange};
use disc_catalog::sort::{sort_by_date, sort_by_name};
use disc_catalog::{Catalog, NodeKind};
use std::path::MAIN_SEPARATOR_STR;

fn joined(parts: &[&str]) -> String {
    parts.join(MAIN_SEPARATOR_STR)
}

#[test]
fn fuzzy_search_reports_full_paths() {
    let catalog = dated_catalog("backup", "C:", &["docs/report.txt", "docs/report1.txt"]);

    let matches = find_all_fuzzy(&catalog, "report1.txt");
    let paths: Vec<_> = matches.iter().map(|m| m.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            joined(&["C:", "docs", "report.txt"]),
            joined(&["C:", "docs", "report1.txt"]),
        ]
    );
    assert!(find_all_fuzzy(&catalog, "rep.txt").is_empty());
}

#[test]
fn directories_are_shared_but_files_are_not() {
    let mut catalog = Catalog::new("disc", "/");
    catalog.insert_directory("a/b").unwrap();
    catalog.insert_directory("a/b").unwrap();
    catalog.insert_file("a/b/x.txt").unwrap();
    catalog.insert_file("a/b/x.txt").unwrap();

    let stats = catalog.stats();
    assert_eq!(stats.directories, 3);
    assert_eq!(stats.files, 2);

    let b = catalog
        .root
        .child_directory("a")
        .and_then(|a| a.child_directory("b"))
        .unwrap();
    assert!(b.children.iter().all(|c| c.kind == NodeKind::File));
}

#[test]
fn exact_search_returns_first_in_preorder() {
    let mut catalog = Catalog::new("disc", "/");
    catalog.insert_file("a/deep/temp").unwrap();
    catalog.insert_file("b/temp").unwrap();
    catalog.insert_file("temp").unwrap();

    let hit = find_first(&catalog, "temp").unwrap();
    // a/deep/temp is visited before the shallower b/temp and /temp
    let deep = catalog
        .root
        .child_directory("a")
        .and_then(|a| a.child_directory("deep"))
        .unwrap();
    assert!(std::ptr::eq(hit, &deep.children[0]));
    assert!(find_first(&catalog, "TEMP").is_none());
}

#[test]
fn date_filtered_search_after_sorting() {
    let mut catalog = dated_catalog(
        "disc",
        "/",
        &["z/notes.txt", "y/notes.txt", "x/notes.txt"],
    );
    // notes stamped 2023-01-01, 01-02, 01-03 under z, y, x respectively
    sort_by_name(&mut catalog);
    let first = find_first(&catalog, "notes.txt").unwrap();
    assert_eq!(first.timestamp, ts("2023-01-03T00:00:00Z"));

    let range = DateRange::new(ts("2023-01-01T00:00:00Z"), ts("2023-01-02T00:00:00Z"));
    let within = find_first_within(&catalog, "notes.txt", range.start, range.end).unwrap();
    assert_eq!(within.timestamp, ts("2023-01-02T00:00:00Z"));

    sort_by_date(&mut catalog);
    let names: Vec<_> = catalog.root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["z", "y", "x"]);
}

#[test]
fn empty_file_path_is_rejected() {
    let mut catalog = Catalog::new("disc", "/");
    assert!(catalog.insert_file("").is_err());
    assert!(catalog.insert_directory("").is_ok());
    assert!(catalog.root.children.is_empty());
}
