//! Building an index from a checksum listing.
//!
//! Accepts the text format printed by `sha256sum` and `b3sum`: one
//! `<64 hex digits>  <path>` record per line. A single trailing empty line
//! is allowed; any other deviation is a hard error.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::{Digest, DigestIndex};

/// Separator between digest and path.
const SEPARATOR: &str = "  ";

/// Parse a listing into an index without touching the filesystem.
///
/// Member sizes are recorded as zero.
///
/// # Errors
/// Returns [`Error::MalformedRecord`] with the 1-based line number of the
/// first line that is not a valid record.
pub fn parse_listing(text: &str) -> Result<DigestIndex> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let mut index = DigestIndex::default();

    if body.is_empty() {
        return Ok(index);
    }

    for (i, line) in body.split('\n').enumerate() {
        let (digest, path) = parse_record(line.strip_suffix('\r').unwrap_or(line))
            .map_err(|reason| Error::MalformedRecord { line: i + 1, reason })?;
        index.insert(digest, 0, path);
    }

    Ok(index)
}

/// Read a listing and fill in member sizes from the filesystem where the
/// files still exist.
///
/// # Errors
/// Returns an error if the reader fails or the listing is malformed.
pub fn read_listing<R: Read>(mut reader: R) -> Result<DigestIndex> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut index = parse_listing(&text)?;
    for entry in index.groups.values_mut() {
        if let Some(size) = entry.paths.iter().find_map(|p| fs::metadata(p).ok()).map(|m| m.len()) {
            entry.size = size;
        }
    }
    Ok(index)
}

fn parse_record(line: &str) -> std::result::Result<(Digest, PathBuf), String> {
    if line.is_empty() {
        return Err("empty line".to_string());
    }
    if line.starts_with('\\') {
        return Err("escaped file names are not supported".to_string());
    }
    let (hex, path) = line
        .split_once(SEPARATOR)
        .ok_or_else(|| "expected `<digest>  <path>`".to_string())?;
    if path.is_empty() {
        return Err("missing path".to_string());
    }
    let digest = Digest::from_hex(hex)?;
    Ok((digest, PathBuf::from(path)))
}

// ============================================================================
// TESTS
// ============================================================================
