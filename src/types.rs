//! Domain types for find-dupes.
//!
//! Plain data: digests, the digest index, duplicate groups, and the
//! records produced by the deletion paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Content identity: equal digests mean equal bytes.
///
/// Wraps a 32-byte hash. BLAKE3 when scanning; whatever 256-bit algorithm
/// produced a checksum listing when reading one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse a 64-character hex string (either case).
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        hex_to_bytes(hex).map(Digest)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Digest::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

fn hex_to_bytes(hex: &str) -> Result<[u8; 32], String> {
    if hex.len() != 64 {
        return Err(format!("expected 64 hex chars, got {}", hex.len()));
    }
    blake3::Hash::from_hex(hex)
        .map(|h| *h.as_bytes())
        .map_err(|e| e.to_string())
}

// ============================================================================
// INDEX
// ============================================================================

/// Every scanned file, keyed by digest, in enumeration order.
///
/// Groups keep insertion order: the first digest seen comes first, and
/// paths inside a group are in the order they were discovered.
#[derive(Debug, Clone, Default)]
pub struct DigestIndex {
    /// Digest → (file size, member paths).
    pub groups: IndexMap<Digest, IndexEntry>,
    /// Files or directories that could not be read (path, reason).
    pub skipped: Vec<(PathBuf, String)>,
}

/// One digest's members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    /// Size in bytes of each member (identical content, identical size).
    pub size: u64,
    pub paths: Vec<PathBuf>,
}

impl DigestIndex {
    /// Record a file under its digest.
    pub fn insert(&mut self, digest: Digest, size: u64, path: PathBuf) {
        let entry = self.groups.entry(digest).or_insert_with(|| IndexEntry {
            size,
            paths: Vec::new(),
        });
        entry.paths.push(path);
    }

    /// Total number of files indexed.
    pub fn file_count(&self) -> usize {
        self.groups.values().map(|e| e.paths.len()).sum()
    }

    /// Number of distinct digests.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ============================================================================
// DUPLICATES
// ============================================================================

/// Two or more files sharing one digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub digest: Digest,
    /// Size in bytes of each member.
    pub size: u64,
    /// Members in enumeration order. Always at least two.
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Bytes freed by keeping exactly one copy.
    pub fn redundant_bytes(&self) -> u64 {
        self.size * (self.paths.len().saturating_sub(1) as u64)
    }
}

/// The duplicate groups of an index, plus what the scan had to skip.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DuplicateSet {
    pub groups: Vec<DuplicateGroup>,
    /// Files or directories that could not be read (path, reason).
    pub skipped: Vec<(PathBuf, String)>,
}

impl DuplicateSet {
    /// Number of copies beyond the first in every group.
    pub fn redundant_copies(&self) -> usize {
        self.groups.iter().map(|g| g.paths.len() - 1).sum()
    }

    /// Total bytes recoverable by keeping one copy per group.
    pub fn redundant_bytes(&self) -> u64 {
        self.groups.iter().map(DuplicateGroup::redundant_bytes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ============================================================================
// DELETION RECORDS
// ============================================================================

/// What happened to one file that was visited by a deletion path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Not targeted; left in place.
    Kept,
    /// Removed from disk.
    Deleted,
    /// Dry run: would have been removed.
    WouldDelete,
    /// Removal was attempted and failed.
    Failed { reason: String },
}

/// A visited path and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionRecord {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: DeleteOutcome,
}

impl DeletionRecord {
    pub fn kept(path: &Path) -> Self {
        DeletionRecord {
            path: path.to_path_buf(),
            outcome: DeleteOutcome::Kept,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, DeleteOutcome::Failed { .. })
    }
}

/// One duplicate group as seen by the cross-set resolver.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedGroup {
    pub digest: Digest,
    /// Every member of the group, with what was done to it.
    pub members: Vec<DeletionRecord>,
}

/// Outcome of a cross-set run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrossSetReport {
    /// The directory whose copies are redundant.
    pub subpath: PathBuf,
    pub dry_run: bool,
    /// Groups with copies both inside and outside the subpath.
    pub resolved: Vec<ResolvedGroup>,
    /// Groups whose every copy lives under the subpath; left untouched.
    pub all_inside: Vec<DuplicateGroup>,
    /// Files the scan could not read.
    pub skipped: Vec<(PathBuf, String)>,
}

impl CrossSetReport {
    /// Records of files removed (or that would be, in a dry run).
    pub fn removed(&self) -> impl Iterator<Item = &DeletionRecord> {
        self.resolved.iter().flat_map(|g| &g.members).filter(|r| {
            matches!(r.outcome, DeleteOutcome::Deleted | DeleteOutcome::WouldDelete)
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeletionRecord> {
        self.resolved
            .iter()
            .flat_map(|g| &g.members)
            .filter(|r| r.is_failure())
    }
}

/// Outcome of an interactive session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InteractiveReport {
    /// Every deletion attempted, in order.
    pub records: Vec<DeletionRecord>,
    /// Groups the operator cancelled (digest).
    pub cancelled: Vec<Digest>,
    /// Groups the operator confirmed with nothing selected.
    pub untouched: usize,
}

impl InteractiveReport {
    pub fn deleted(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == DeleteOutcome::Deleted)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.is_failure()).count()
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Configuration for scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Sub-path skipped entirely, with its descendants.
    pub exclude: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: None,
        }
    }
}

/// Configuration for cross-set deletion.
#[derive(Debug, Clone)]
pub struct CrossSetConfig {
    /// Directory holding the redundant copies. Must lie inside the scan root.
    pub subpath: PathBuf,
    /// Report only; leave the filesystem untouched.
    pub dry_run: bool,
}

/// Configuration for interactive resolution.
#[derive(Debug, Clone, Default)]
pub struct InteractiveConfig {
    /// Pause after each deletion so progress is visible. Zero disables it.
    pub pause: Duration,
}

// ============================================================================
// TESTS
// ============================================================================
