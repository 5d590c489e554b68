//! Deletion of redundant copies.
//!
//! The one place files get removed. Every call is logged, and a dry run
//! produces the same record a real deletion would, minus the removal.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::types::{DeleteOutcome, DeletionRecord};

/// Remove `path`, or only report it when `dry_run` is set.
///
/// Never returns an error: a failed removal becomes a
/// [`DeleteOutcome::Failed`] record so the caller can move on to the next
/// file. Nothing is re-checked before removal.
pub fn delete_file(path: &Path, dry_run: bool) -> DeletionRecord {
    let outcome = if dry_run {
        info!(path = %path.display(), "would delete");
        DeleteOutcome::WouldDelete
    } else {
        info!(path = %path.display(), "deleting");
        match fs::remove_file(path) {
            Ok(()) => DeleteOutcome::Deleted,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "deletion failed");
                DeleteOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    };

    DeletionRecord {
        path: path.to_path_buf(),
        outcome,
    }
}

// ============================================================================
// TESTS
// ============================================================================
