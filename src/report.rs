//! Report formatting.
//!
//! Pure functions: (report, OutputFormat) → String.
//! No I/O, no side effects.

use std::path::PathBuf;

use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::error::Result;
use crate::types::{
    CrossSetReport, DeleteOutcome, DeletionRecord, DuplicateGroup, DuplicateSet,
    InteractiveReport, OutputFormat,
};

/// Format the duplicate groups of a scan.
///
/// # Errors
/// JSON output fails if a path is not valid UTF-8.
pub fn format_duplicates(set: &DuplicateSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(format_duplicates_human(set)),
        OutputFormat::Json => format_json(set),
    }
}

/// Format the outcome of a cross-set run.
///
/// # Errors
/// JSON output fails if a path is not valid UTF-8.
pub fn format_cross_set(report: &CrossSetReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(format_cross_set_human(report)),
        OutputFormat::Json => format_json(report),
    }
}

/// One line describing what happened to a file.
pub fn format_record(record: &DeletionRecord) -> String {
    let path = record.path.display();
    match &record.outcome {
        DeleteOutcome::Kept => format!("kept: {}", path),
        DeleteOutcome::Deleted => format!("deleted: {}", path),
        DeleteOutcome::WouldDelete => format!("would delete: {}", path),
        DeleteOutcome::Failed { reason } => format!("failed: {} ({})", path, reason),
    }
}

/// Closing summary of an interactive session.
pub fn format_interactive_summary(report: &InteractiveReport) -> String {
    let mut out = String::new();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Deleted:           {}\n", report.deleted()));
    out.push_str(&format!("Failed:            {}\n", report.failed()));
    out.push_str(&format!("Groups skipped:    {}\n", report.cancelled.len()));
    out.push_str(&format!("Groups kept whole: {}\n", report.untouched));
    out
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn push_group(out: &mut String, group: &DuplicateGroup) {
    out.push_str(&format!("{}:\n", group.digest));
    for path in &group.paths {
        out.push_str(&format!("\t - {}\n", path.display()));
    }
}

fn push_skipped(out: &mut String, skipped: &[(PathBuf, String)]) {
    if skipped.is_empty() {
        return;
    }
    out.push_str("=== Skipped (read errors) ===\n");
    for (path, error) in skipped {
        out.push_str(&format!("  {} - {}\n", path.display(), error));
    }
    out.push('\n');
}

fn format_duplicates_human(set: &DuplicateSet) -> String {
    let mut out = String::new();

    for group in &set.groups {
        push_group(&mut out, group);
    }
    if !set.groups.is_empty() {
        out.push('\n');
    }

    push_skipped(&mut out, &set.skipped);

    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Duplicate groups:   {}\n", set.groups.len()));
    out.push_str(&format!("Redundant copies:   {}\n", set.redundant_copies()));
    if !set.skipped.is_empty() {
        out.push_str(&format!("Skipped (errors):   {}\n", set.skipped.len()));
    }
    out.push_str(&format!(
        "Space recoverable:  {}\n",
        format_size(set.redundant_bytes(), BINARY)
    ));

    out
}

fn format_cross_set_human(report: &CrossSetReport) -> String {
    let mut out = String::new();
    let subpath = report.subpath.display();

    if !report.resolved.is_empty() {
        let title = if report.dry_run {
            "=== Copies inside the target (dry run) ==="
        } else {
            "=== Copies inside the target ==="
        };
        out.push_str(title);
        out.push('\n');
        for group in &report.resolved {
            out.push_str(&format!("{}:\n", group.digest));
            for record in &group.members {
                out.push_str(&format!("\t - {}\n", format_record(record)));
            }
        }
        out.push('\n');
    }

    if !report.all_inside.is_empty() {
        out.push_str(&format!("=== Kept: every copy is inside {} ===\n", subpath));
        for group in &report.all_inside {
            push_group(&mut out, group);
        }
        out.push('\n');
    }

    push_skipped(&mut out, &report.skipped);

    let removed = report.removed().count();
    let failed = report.failures().count();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Target:             {}\n", subpath));
    out.push_str(&format!("Groups resolved:    {}\n", report.resolved.len()));
    out.push_str(&format!("Groups kept whole:  {}\n", report.all_inside.len()));
    if report.dry_run {
        out.push_str(&format!("Would delete:       {}\n", removed));
    } else {
        out.push_str(&format!("Deleted:            {}\n", removed));
        out.push_str(&format!("Failed:             {}\n", failed));
    }
    if !report.skipped.is_empty() {
        out.push_str(&format!("Skipped (errors):   {}\n", report.skipped.len()));
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// ============================================================================
// TESTS
// ============================================================================
