//! Directory scanning and duplicate grouping.
//!
//! Walks a tree, hashes every regular file, and groups files by digest.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::hash::hash_file;
use crate::types::{Digest, DigestIndex, DuplicateGroup, DuplicateSet, ScanConfig};

/// Regular files found under a root, plus entries that could not be read.
#[derive(Debug, Default)]
pub struct FileWalk {
    /// File paths in enumeration order.
    pub files: Vec<PathBuf>,
    /// Entries the walk could not descend into or stat (path, reason).
    pub skipped: Vec<(PathBuf, String)>,
}

/// Enumerate every regular file under `config.root`.
///
/// The excluded sub-path, if any, is pruned with all its descendants.
/// Symbolic links are neither followed nor listed.
///
/// # Errors
/// Returns an error if the root does not exist, is not a directory, or
/// cannot be read. Failures below the root are collected in
/// [`FileWalk::skipped`].
pub fn walk_files(config: &ScanConfig) -> Result<FileWalk> {
    let root = &config.root;
    let metadata = fs::metadata(root).map_err(|source| Error::Scan {
        path: root.clone(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory { path: root.clone() });
    }

    let walker = WalkDir::new(root).sort_by_file_name();
    let exclude = config.exclude.as_deref();

    let mut walk = FileWalk::default();
    let entries = walker
        .into_iter()
        .filter_entry(|entry| !exclude.is_some_and(|x| entry.path().starts_with(x)));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(Error::Scan {
                    path: root.clone(),
                    source: err.into(),
                });
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                walk.skipped.push((path, err.to_string()));
                continue;
            }
        };

        if entry.file_type().is_file() {
            walk.files.push(entry.into_path());
        }
    }

    Ok(walk)
}

/// Scan and hash a tree into a [`DigestIndex`].
///
/// # Errors
/// Returns an error only if the root itself cannot be scanned. Files that
/// fail to hash land in [`DigestIndex::skipped`].
pub fn build_index(config: &ScanConfig) -> Result<DigestIndex> {
    build_index_with_progress(config, |_, _| {})
}

/// Like [`build_index`], calling `on_progress(files_hashed, total_files)`
/// after each file.
pub fn build_index_with_progress<F>(config: &ScanConfig, mut on_progress: F) -> Result<DigestIndex>
where
    F: FnMut(usize, usize),
{
    let walk = walk_files(config)?;
    let total = walk.files.len();

    let mut index = DigestIndex {
        skipped: walk.skipped,
        ..Default::default()
    };

    for (done, path) in walk.files.into_iter().enumerate() {
        match hash_and_size(&path) {
            Ok((digest, size)) => {
                debug!(path = %path.display(), %digest, "hashed");
                index.insert(digest, size, path);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file");
                index.skipped.push((path, err.to_string()));
            }
        }
        on_progress(done + 1, total);
    }

    Ok(index)
}

fn hash_and_size(path: &Path) -> Result<(Digest, u64)> {
    let size = fs::metadata(path)
        .map_err(|source| Error::Hash {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    Ok((hash_file(path)?, size))
}

/// Keep only the digests shared by two or more files.
///
/// Pure: group order and member order follow the index.
pub fn group_duplicates(index: &DigestIndex) -> DuplicateSet {
    let groups = index
        .groups
        .iter()
        .filter(|(_, entry)| entry.paths.len() > 1)
        .map(|(digest, entry)| DuplicateGroup {
            digest: digest.clone(),
            size: entry.size,
            paths: entry.paths.clone(),
        })
        .collect();

    DuplicateSet {
        groups,
        skipped: index.skipped.clone(),
    }
}

/// Scan a tree and return its duplicate groups.
///
/// # Errors
/// Returns an error if the root cannot be scanned.
pub fn find_duplicates(config: &ScanConfig) -> Result<DuplicateSet> {
    Ok(group_duplicates(&build_index(config)?))
}

/// Canonicalize a root and a path that must lie inside it.
///
/// # Errors
/// Returns [`Error::Scan`] if either path cannot be resolved and
/// [`Error::NotNested`] if `inner` is not `root` or a descendant of it.
pub fn resolve_nested(root: &Path, inner: &Path) -> Result<(PathBuf, PathBuf)> {
    let canonical = |path: &Path| {
        fs::canonicalize(path).map_err(|source| Error::Scan {
            path: path.to_path_buf(),
            source,
        })
    };
    let root = canonical(root)?;
    let inner = canonical(inner)?;

    if !inner.starts_with(&root) {
        return Err(Error::NotNested {
            root,
            subpath: inner,
        });
    }
    Ok((root, inner))
}

// ============================================================================
// TESTS
// ============================================================================
