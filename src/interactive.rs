//! Interactive, per-group resolution.
//!
//! Each duplicate group is offered to a [`Selector`]; the members it picks
//! are deleted, the rest stay. A cancelled group is skipped whole.

use std::path::Path;
use std::thread;

use tracing::info;

use crate::delete::delete_file;
use crate::error::Result;
use crate::types::{DeletionRecord, DuplicateGroup, DuplicateSet, InteractiveConfig, InteractiveReport};

/// The operator's answer for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Indices of the items to delete. May be empty.
    Chosen(Vec<usize>),
    /// Leave this group untouched.
    Cancelled,
}

/// A multi-select prompt.
pub trait Selector {
    /// Present `items` under `header` and return the operator's choice.
    ///
    /// # Errors
    /// Returns an error if the prompt itself fails (terminal I/O).
    fn select(&mut self, header: &str, items: &[String]) -> Result<Selection>;
}

/// Header line shown above a group's members.
pub fn group_header(group: &DuplicateGroup, position: usize, total: usize) -> String {
    format!(
        "Group {}/{}: {} ({} copies) - select files to delete",
        position,
        total,
        group.digest,
        group.paths.len()
    )
}

/// Walk every group through `selector`, deleting what it picks.
///
/// Deletion is never a dry run here. `on_record` sees each deletion as it
/// happens; `config.pause` is slept after each one.
///
/// # Errors
/// Returns an error only if the selector fails. Failed deletions are
/// recorded and the session continues.
pub fn resolve_interactively<S, F>(
    set: &DuplicateSet,
    selector: &mut S,
    config: &InteractiveConfig,
    mut on_record: F,
) -> Result<InteractiveReport>
where
    S: Selector + ?Sized,
    F: FnMut(&DeletionRecord),
{
    let mut report = InteractiveReport::default();
    let total = set.groups.len();

    for (i, group) in set.groups.iter().enumerate() {
        let items: Vec<String> = group.paths.iter().map(|p| p.display().to_string()).collect();
        let header = group_header(group, i + 1, total);

        let chosen = match selector.select(&header, &items)? {
            Selection::Cancelled => {
                info!(digest = %group.digest, "group cancelled");
                report.cancelled.push(group.digest.clone());
                continue;
            }
            Selection::Chosen(chosen) => chosen,
        };

        let targets: Vec<&Path> = group
            .paths
            .iter()
            .enumerate()
            .filter(|(idx, _)| chosen.contains(idx))
            .map(|(_, p)| p.as_path())
            .collect();

        if targets.is_empty() {
            report.untouched += 1;
            continue;
        }

        for path in targets {
            let record = delete_file(path, false);
            on_record(&record);
            report.records.push(record);
            if !config.pause.is_zero() {
                thread::sleep(config.pause);
            }
        }
    }

    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
