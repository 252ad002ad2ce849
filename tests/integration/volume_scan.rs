//! Building catalogs from real directories

use crate::integration::test_utils::{sample_volume, write};
use disc_catalog::search::{find_all_fuzzy, find_first};
use disc_catalog::tree::{render, TimestampSource, WalkerConfig};
use disc_catalog::{CatalogBuilder, CatalogError, NodeKind, ScanProgress};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[test]
fn scan_mirrors_volume_layout() {
    let volume = sample_volume();
    let outcome = CatalogBuilder::new("backup", volume.path().to_path_buf())
        .build()
        .unwrap();
    let catalog = outcome.catalog;

    let top: Vec<_> = catalog
        .root
        .children
        .iter()
        .map(|c| (c.name.as_str(), c.kind))
        .collect();
    assert_eq!(
        top,
        vec![
            ("docs", NodeKind::Directory),
            ("music", NodeKind::Directory),
            ("readme.md", NodeKind::File),
        ]
    );

    let docs = catalog.root.child_directory("docs").unwrap();
    let docs_children: Vec<_> = docs.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(docs_children, vec!["old", "report.txt"]);

    assert_eq!(outcome.stats.directories, 3);
    assert_eq!(outcome.stats.files, 4);
    assert!(outcome.stats.faults.is_empty());
}

#[test]
fn scanned_catalog_is_searchable() {
    let volume = sample_volume();
    let catalog = CatalogBuilder::new("backup", volume.path().to_path_buf())
        .build()
        .unwrap()
        .catalog;

    // docs/old/report.txt is reached before docs/report.txt
    let old = catalog
        .root
        .child_directory("docs")
        .and_then(|d| d.child_directory("old"))
        .unwrap();
    let hit = find_first(&catalog, "report.txt").unwrap();
    assert!(std::ptr::eq(hit, &old.children[0]));

    let matches = find_all_fuzzy(&catalog, "reprot.txt");
    assert_eq!(matches.len(), 2);
    assert!(matches
        .iter()
        .all(|m| m.path.starts_with(&catalog.root.name)));
    assert!(find_all_fuzzy(&catalog, "song.mp4")[0].path.ends_with("song.mp3"));
}

#[test]
fn ignore_patterns_and_progress() {
    let volume = sample_volume();
    write(volume.path(), ".git/HEAD");

    let progress = Arc::new(ScanProgress::new());
    let config = WalkerConfig {
        ignore_patterns: vec![".git".to_string()],
        timestamps: TimestampSource::Modified,
        ..WalkerConfig::default()
    };
    let outcome = CatalogBuilder::new("backup", volume.path().to_path_buf())
        .with_walker_config(config)
        .with_observer(progress.clone())
        .build()
        .unwrap();

    assert!(find_first(&outcome.catalog, ".git").is_none());
    let snapshot = progress.snapshot();
    assert_eq!(snapshot.scanned_files, 4);
    assert_eq!(snapshot.scanned_dirs, 3);
    assert!(snapshot.is_finished());
}

#[test]
fn outline_lists_every_node() {
    let volume = sample_volume();
    let catalog = CatalogBuilder::new("backup", volume.path().to_path_buf())
        .build()
        .unwrap()
        .catalog;

    let outline = render::outline(&catalog.root);
    let lines: Vec<_> = outline.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], catalog.root.name);
    assert!(lines[1].starts_with("    (") && lines[1].ends_with(") docs"));
    assert!(lines[2].starts_with("        (") && lines[2].ends_with(") old"));
}

#[test]
fn cancelled_scan_fails() {
    let volume = sample_volume();
    let result = CatalogBuilder::new("backup", volume.path().to_path_buf())
        .with_cancel(Arc::new(AtomicBool::new(true)))
        .build();
    assert!(matches!(result, Err(CatalogError::Cancelled)));
}

#[cfg(unix)]
#[test]
fn symlink_loop_is_a_fault_not_a_failure() {
    use std::os::unix::fs::symlink;

    let volume = sample_volume();
    symlink("..", volume.path().join("docs").join("loop")).unwrap();

    let progress = Arc::new(ScanProgress::new());
    let config = WalkerConfig {
        follow_symlinks: true,
        ..WalkerConfig::default()
    };
    let outcome = CatalogBuilder::new("backup", volume.path().to_path_buf())
        .with_walker_config(config)
        .with_observer(progress.clone())
        .build()
        .unwrap();

    assert_eq!(outcome.stats.faults.len(), 1);
    let fault_path = outcome.stats.faults[0].path.as_ref().unwrap();
    assert!(fault_path.ends_with("docs/loop"));
    assert_eq!(progress.snapshot().faults, 1);

    // Siblings and ancestors of the loop are still cataloged
    let catalog = &outcome.catalog;
    let docs = catalog.root.child_directory("docs").unwrap();
    assert!(docs.child_directory("old").is_some());
    assert!(docs.children.iter().any(|c| c.name == "report.txt"));
    assert!(catalog.root.child_directory("music").is_some());
    assert!(find_first(catalog, "readme.md").is_some());
    assert_eq!(outcome.stats.files, 4);
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_skipped() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let volume = sample_volume();
    write(volume.path(), "locked/secret.txt");
    let locked = volume.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not stop a privileged user
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let progress = Arc::new(ScanProgress::new());
    let result = CatalogBuilder::new("backup", volume.path().to_path_buf())
        .with_observer(progress.clone())
        .build();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let outcome = result.unwrap();

    assert_eq!(outcome.stats.faults.len(), 1);
    assert_eq!(
        outcome.stats.faults[0].path.as_deref(),
        Some(locked.canonicalize().unwrap().as_path())
    );
    assert_eq!(progress.snapshot().faults, 1);

    let catalog = &outcome.catalog;
    let locked_node = catalog.root.child_directory("locked").unwrap();
    assert!(locked_node.children.is_empty());
    assert!(find_first(catalog, "secret.txt").is_none());
    assert!(find_first(catalog, "song.mp3").is_some());
    assert!(find_first(catalog, "readme.md").is_some());
    assert_eq!(outcome.stats.files, 4);
    assert!(progress.snapshot().is_finished());
}
