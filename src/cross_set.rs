//! Cross-set deduplication.
//!
//! Given a scan root A and a directory B nested inside it, remove the copies
//! under B of any file that also has a copy outside B. A group whose every
//! copy lives under B is left alone so the content survives.
//!
//! Structure:
//! - Pure functions: `classify_group`
//! - Effect functions: `resolve_cross_set`, `delete_cross_set[_with_progress]`

use std::path::Path;

use tracing::info;

use crate::delete::delete_file;
use crate::error::Result;
use crate::scanner::{build_index_with_progress, group_duplicates, resolve_nested};
use crate::types::{
    CrossSetConfig, CrossSetReport, DeletionRecord, DuplicateGroup, DuplicateSet, ResolvedGroup,
    ScanConfig,
};

/// How a duplicate group relates to the redundant subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupPlacement {
    /// No member lies under the subtree.
    Outside,
    /// Every member lies under the subtree.
    AllInside,
    /// Some but not all members lie under the subtree; these indices do.
    Mixed { inside: Vec<usize> },
}

/// Classify a group against `subpath`.
///
/// Membership is by path ancestry: `/data/foo` contains `/data/foo/x` but
/// not `/data/foobar/x`.
pub fn classify_group(group: &DuplicateGroup, subpath: &Path) -> GroupPlacement {
    let inside: Vec<usize> = group
        .paths
        .iter()
        .enumerate()
        .filter(|(_, p)| p.starts_with(subpath))
        .map(|(i, _)| i)
        .collect();

    match inside.len() {
        0 => GroupPlacement::Outside,
        n if n == group.paths.len() => GroupPlacement::AllInside,
        _ => GroupPlacement::Mixed { inside },
    }
}

/// Apply cross-set deletion to an already computed duplicate set.
///
/// For every mixed group, each member under `subpath` goes through
/// [`delete_file`] and every other member is recorded as kept. A failed
/// deletion is recorded and the remaining members are still processed.
pub fn resolve_cross_set(set: &DuplicateSet, subpath: &Path, dry_run: bool) -> CrossSetReport {
    let mut report = CrossSetReport {
        subpath: subpath.to_path_buf(),
        dry_run,
        skipped: set.skipped.clone(),
        ..Default::default()
    };

    for group in &set.groups {
        match classify_group(group, subpath) {
            GroupPlacement::Outside => {}
            GroupPlacement::AllInside => {
                info!(digest = %group.digest, "every copy is inside the target, keeping all");
                report.all_inside.push(group.clone());
            }
            GroupPlacement::Mixed { inside } => {
                info!(
                    digest = %group.digest,
                    inside = inside.len(),
                    total = group.paths.len(),
                    "removing copies inside the target"
                );
                let members = group
                    .paths
                    .iter()
                    .enumerate()
                    .map(|(i, path)| {
                        if inside.contains(&i) {
                            delete_file(path, dry_run)
                        } else {
                            DeletionRecord::kept(path)
                        }
                    })
                    .collect();
                report.resolved.push(ResolvedGroup {
                    digest: group.digest.clone(),
                    members,
                });
            }
        }
    }

    report
}

/// Scan `root` and delete the redundant copies under `config.subpath`.
///
/// Both paths are canonicalized first, so the report holds absolute paths.
///
/// # Errors
/// Returns an error if either path cannot be resolved, the subpath is not
/// inside the root, or the root cannot be scanned.
pub fn delete_cross_set(root: &Path, config: &CrossSetConfig) -> Result<CrossSetReport> {
    delete_cross_set_with_progress(root, config, |_, _| {})
}

/// Like [`delete_cross_set`], calling `on_progress(files_hashed, total_files)`
/// while the root is hashed.
pub fn delete_cross_set_with_progress<F>(
    root: &Path,
    config: &CrossSetConfig,
    on_progress: F,
) -> Result<CrossSetReport>
where
    F: FnMut(usize, usize),
{
    let (root, subpath) = resolve_nested(root, &config.subpath)?;
    let scan = ScanConfig {
        root,
        ..Default::default()
    };
    let index = build_index_with_progress(&scan, on_progress)?;
    let set = group_duplicates(&index);
    Ok(resolve_cross_set(&set, &subpath, config.dry_run))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeleteOutcome, Digest};
    use std::path::PathBuf;

    fn group(paths: &[&str]) -> DuplicateGroup {
        DuplicateGroup {
            digest: Digest([0x11; 32]),
            size: 3,
            paths: paths.iter().map(PathBuf::from).collect(),
        }
    }

    #[test]
    fn classify_outside() {
        let g = group(&["/data/a/x", "/data/a/y"]);
        assert_eq!(classify_group(&g, Path::new("/data/b")), GroupPlacement::Outside);
    }

    #[test]
    fn classify_all_inside() {
        let g = group(&["/data/b/x", "/data/b/deep/y"]);
        assert_eq!(classify_group(&g, Path::new("/data/b")), GroupPlacement::AllInside);
    }

    #[test]
    fn classify_mixed_lists_inside_indices() {
        let g = group(&["/data/b/y", "/data/a/x", "/data/b/z"]);
        assert_eq!(
            classify_group(&g, Path::new("/data/b")),
            GroupPlacement::Mixed { inside: vec![0, 2] }
        );
    }

    #[test]
    fn classify_ignores_sibling_with_shared_prefix() {
        let g = group(&["/data/foo/x", "/data/foobar/x"]);
        assert_eq!(
            classify_group(&g, Path::new("/data/foo")),
            GroupPlacement::Mixed { inside: vec![0] }
        );
    }

    #[test]
    fn dry_run_reports_every_member_and_touches_nothing() {
        let set = DuplicateSet {
            groups: vec![
                group(&["/data/a/x", "/data/b/y", "/data/b/z"]),
                group(&["/data/b/p", "/data/b/q"]),
                group(&["/data/a/m", "/data/a/n"]),
            ],
            skipped: Vec::new(),
        };

        let report = resolve_cross_set(&set, Path::new("/data/b"), true);

        assert_eq!(report.resolved.len(), 1);
        assert_eq!(report.all_inside.len(), 1);
        let seen = &report.resolved[0].members;
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], DeletionRecord::kept(Path::new("/data/a/x")));
        assert_eq!(seen[1].outcome, DeleteOutcome::WouldDelete);
        assert_eq!(seen[2].outcome, DeleteOutcome::WouldDelete);
        assert_eq!(report.removed().count(), 2);
        assert_eq!(report.failures().count(), 0);
    }
}
