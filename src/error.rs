//! Error type for find-dupes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run.
///
/// Per-file problems during a scan are not errors: they are collected in
/// [`DigestIndex::skipped`](crate::types::DigestIndex::skipped) and the scan
/// carries on. Failed deletions become
/// [`DeleteOutcome::Failed`](crate::types::DeleteOutcome::Failed) records.
#[derive(Debug, Error)]
pub enum Error {
    /// The scan root could not be read.
    #[error("cannot scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// A file could not be read while hashing.
    #[error("cannot hash {}: {source}", path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A checksum listing line did not have the `<digest>  <path>` shape.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The cross-set target does not lie inside the scan root.
    #[error("{} is not inside {}", subpath.display(), root.display())]
    NotNested { root: PathBuf, subpath: PathBuf },

    /// A report could not be encoded as JSON (for example a non-UTF-8 path).
    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or driving the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
