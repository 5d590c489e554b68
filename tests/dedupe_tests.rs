//! End-to-end behavior of the library on real directory trees.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use walkdir::WalkDir;

use find_dupes::cross_set::{delete_cross_set, delete_cross_set_with_progress, resolve_cross_set};
use find_dupes::interactive::{Selection, Selector, resolve_interactively};
use find_dupes::listing::parse_listing;
use find_dupes::scanner::{build_index, find_duplicates, group_duplicates, resolve_nested};
use find_dupes::types::{CrossSetConfig, DeleteOutcome, InteractiveConfig, ScanConfig};
use find_dupes::{Error, Result};

// ============================================================================
// HELPERS
// ============================================================================

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn scan(root: &Path) -> ScanConfig {
    ScanConfig {
        root: root.canonicalize().unwrap(),
        ..Default::default()
    }
}

/// Every regular file under `root`, sorted, with its contents.
fn snapshot(root: &Path) -> Vec<(PathBuf, String)> {
    let mut files: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let path = e.into_path();
            let content = fs::read_to_string(&path).unwrap();
            (path, content)
        })
        .collect();
    files.sort();
    files
}

/// Replays canned answers and records what it was shown.
struct Scripted {
    answers: VecDeque<Selection>,
    shown: Vec<Vec<String>>,
}

impl Scripted {
    fn new(answers: Vec<Selection>) -> Self {
        Scripted {
            answers: answers.into(),
            shown: Vec::new(),
        }
    }
}

impl Selector for Scripted {
    fn select(&mut self, _header: &str, items: &[String]) -> Result<Selection> {
        self.shown.push(items.to_vec());
        Ok(self.answers.pop_front().unwrap_or(Selection::Cancelled))
    }
}

// ============================================================================
// GROUPING
// ============================================================================

#[test]
fn same_content_groups_and_singletons_drop_out() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "same");
    write(dir.path(), "sub/b.txt", "same");
    write(dir.path(), "lonely.txt", "unique");

    let set = find_duplicates(&scan(dir.path())).unwrap();

    assert_eq!(set.groups.len(), 1);
    let names: Vec<_> = set.groups[0]
        .paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"a.txt".to_string()));
    assert!(names.contains(&"b.txt".to_string()));
}

#[test]
fn every_file_lands_in_exactly_one_entry() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "1", "x");
    write(dir.path(), "2", "x");
    write(dir.path(), "3", "y");
    write(dir.path(), "d/4", "z");

    let index = build_index(&scan(dir.path())).unwrap();

    assert_eq!(index.file_count(), 4);
    assert_eq!(index.len(), 3);
    assert!(index.skipped.is_empty());
}

#[test]
fn excluded_subtree_contributes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "keep.txt", "dup");
    write(dir.path(), "sub/copy.txt", "dup");
    write(dir.path(), "sub/deeper/copy2.txt", "dup");

    let mut config = scan(dir.path());
    config.exclude = Some(config.root.join("sub"));
    let index = build_index(&config).unwrap();

    let sub = config.root.join("sub");
    assert!(
        index
            .groups
            .values()
            .flat_map(|entry| &entry.paths)
            .all(|p| !p.starts_with(&sub))
    );
    assert!(group_duplicates(&index).is_empty());
}

#[test]
fn missing_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = ScanConfig {
        root: dir.path().join("nope"),
        ..Default::default()
    };
    assert!(matches!(build_index(&config), Err(Error::Scan { .. })));
}

// ============================================================================
// CROSS-SET
// ============================================================================

#[test]
fn cross_set_deletes_inside_copies_when_outside_copy_exists() {
    let dir = TempDir::new().unwrap();
    let x = write(dir.path(), "A/x", "payload");
    let y = write(dir.path(), "A/B/y", "payload");
    let z = write(dir.path(), "A/B/z", "payload");

    let root = dir.path().join("A");
    let config = CrossSetConfig {
        subpath: root.join("B"),
        dry_run: false,
    };
    let report = delete_cross_set(&root, &config).unwrap();

    assert!(x.exists());
    assert!(!y.exists());
    assert!(!z.exists());

    assert_eq!(report.resolved.len(), 1);
    assert_eq!(report.resolved[0].members.len(), 3);
    assert_eq!(report.removed().count(), 2);
    assert_eq!(report.failures().count(), 0);
}

#[test]
fn cross_set_reports_hashing_progress() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A/x", "payload");
    write(dir.path(), "A/B/y", "payload");
    write(dir.path(), "A/B/other", "different");

    let root = dir.path().join("A");
    let config = CrossSetConfig {
        subpath: root.join("B"),
        dry_run: true,
    };
    let mut ticks = Vec::new();
    let report =
        delete_cross_set_with_progress(&root, &config, |done, total| ticks.push((done, total)))
            .unwrap();

    assert_eq!(ticks, vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(report.removed().count(), 1);
}

#[test]
fn cross_set_keeps_groups_entirely_inside_target() {
    let dir = TempDir::new().unwrap();
    let p = write(dir.path(), "A/B/p", "twin");
    let q = write(dir.path(), "A/B/q", "twin");

    let root = dir.path().join("A");
    let config = CrossSetConfig {
        subpath: root.join("B"),
        dry_run: false,
    };
    let report = delete_cross_set(&root, &config).unwrap();

    assert!(p.exists());
    assert!(q.exists());
    assert!(report.resolved.is_empty());
    assert_eq!(report.all_inside.len(), 1);
}

#[test]
fn cross_set_never_removes_last_copy() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A/one", "alpha");
    write(dir.path(), "A/B/one", "alpha");
    write(dir.path(), "A/B/two", "beta");
    write(dir.path(), "A/B/three", "beta");
    write(dir.path(), "A/Bsibling/four", "gamma");
    write(dir.path(), "A/B/four", "gamma");

    let root = dir.path().join("A");
    let config = CrossSetConfig {
        subpath: root.join("B"),
        dry_run: false,
    };
    delete_cross_set(&root, &config).unwrap();

    let remaining: Vec<String> = snapshot(&root).into_iter().map(|(_, c)| c).collect();
    for content in ["alpha", "beta", "gamma"] {
        assert!(remaining.iter().any(|c| c == content), "lost every {}", content);
    }
    assert!(dir.path().join("A/Bsibling/four").exists());
    assert!(!dir.path().join("A/B/four").exists());
}

#[test]
fn dry_run_changes_nothing_and_reports_like_live_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A/x", "payload");
    write(dir.path(), "A/B/y", "payload");
    write(dir.path(), "A/B/z", "payload");
    let root = dir.path().join("A");

    let before = snapshot(&root);
    let dry = delete_cross_set(
        &root,
        &CrossSetConfig {
            subpath: root.join("B"),
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(snapshot(&root), before);
    assert!(
        dry.removed()
            .all(|r| r.outcome == DeleteOutcome::WouldDelete)
    );

    let live = delete_cross_set(
        &root,
        &CrossSetConfig {
            subpath: root.join("B"),
            dry_run: false,
        },
    )
    .unwrap();

    let dry_paths: Vec<_> = dry.removed().map(|r| r.path.clone()).collect();
    let live_paths: Vec<_> = live.removed().map(|r| r.path.clone()).collect();
    assert_eq!(dry_paths, live_paths);
}

#[test]
fn cross_set_failed_deletion_is_recorded_and_the_rest_continue() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A/x", "payload");
    let y = write(dir.path(), "A/B/y", "payload");
    let z = write(dir.path(), "A/B/z", "payload");

    let (root, subpath) = resolve_nested(&dir.path().join("A"), &dir.path().join("A/B")).unwrap();
    let set = find_duplicates(&ScanConfig {
        root,
        ..Default::default()
    })
    .unwrap();

    // Gone between the scan and the deletion pass
    fs::remove_file(&y).unwrap();

    let report = resolve_cross_set(&set, &subpath, false);

    let members = &report.resolved[0].members;
    let outcome_of = |name: &str| {
        members
            .iter()
            .find(|r| r.path.file_name().is_some_and(|n| n == name))
            .map(|r| r.outcome.clone())
            .unwrap()
    };
    assert!(matches!(outcome_of("y"), DeleteOutcome::Failed { .. }));
    assert_eq!(outcome_of("z"), DeleteOutcome::Deleted);
    assert_eq!(outcome_of("x"), DeleteOutcome::Kept);
    assert!(!z.exists());
    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.removed().count(), 1);
}

#[test]
fn cross_set_rejects_target_outside_root() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("A")).unwrap();
    fs::create_dir_all(dir.path().join("elsewhere")).unwrap();

    let config = CrossSetConfig {
        subpath: dir.path().join("elsewhere"),
        dry_run: false,
    };
    let result = delete_cross_set(&dir.path().join("A"), &config);
    assert!(matches!(result, Err(Error::NotNested { .. })));
}

// ============================================================================
// INTERACTIVE
// ============================================================================

#[test]
fn interactive_deletes_exactly_the_selected_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "first", "dup");
    write(dir.path(), "second", "dup");

    let set = find_duplicates(&scan(dir.path())).unwrap();
    let mut selector = Scripted::new(vec![Selection::Chosen(vec![1])]);
    let config = InteractiveConfig {
        pause: Duration::ZERO,
    };

    let mut seen = Vec::new();
    let report = resolve_interactively(&set, &mut selector, &config, |r| seen.push(r.clone()))
        .unwrap();

    let shown = &selector.shown[0];
    let doomed = PathBuf::from(&shown[1]);
    let survivor = PathBuf::from(&shown[0]);
    assert!(!doomed.exists());
    assert!(survivor.exists());
    assert_eq!(report.deleted(), 1);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, doomed);
}

#[test]
fn interactive_cancel_leaves_group_alone() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a", "one");
    let b = write(dir.path(), "b", "one");
    let c = write(dir.path(), "c", "two");
    let d = write(dir.path(), "d", "two");

    let set = find_duplicates(&scan(dir.path())).unwrap();
    let mut selector = Scripted::new(vec![Selection::Cancelled, Selection::Chosen(vec![])]);
    let config = InteractiveConfig {
        pause: Duration::ZERO,
    };

    let report = resolve_interactively(&set, &mut selector, &config, |_| {}).unwrap();

    for path in [a, b, c, d] {
        assert!(path.exists());
    }
    assert_eq!(report.cancelled.len(), 1);
    assert_eq!(report.untouched, 1);
    assert_eq!(report.deleted(), 0);
}

// ============================================================================
// LISTING
// ============================================================================

#[test]
fn listing_groups_like_a_scan() {
    let digest = "ab".repeat(32);
    let other = "cd".repeat(32);
    let text = format!(
        "{d}  /data/a.txt\n{d}  /data/sub/b.txt\n{o}  /data/c.txt\n",
        d = digest,
        o = other
    );

    let index = parse_listing(&text).unwrap();
    let set = group_duplicates(&index);

    assert_eq!(set.groups.len(), 1);
    assert_eq!(set.groups[0].digest.to_hex(), digest);
    assert_eq!(
        set.groups[0].paths,
        vec![PathBuf::from("/data/a.txt"), PathBuf::from("/data/sub/b.txt")]
    );
}

#[test]
fn listing_rejects_malformed_line() {
    let text = format!("{}  /ok\nnot a record\n", "ab".repeat(32));
    assert!(matches!(
        parse_listing(&text),
        Err(Error::MalformedRecord { line: 2, .. })
    ));
}
