//! Content hashing.
//!
//! Uses BLAKE3 for fast, secure 256-bit digests.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Digest;

/// Compute the BLAKE3 digest of a file's contents.
///
/// Reads the whole file.
///
/// # Errors
/// Returns [`Error::Hash`] if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> Result<Digest> {
    digest_contents(path).map_err(|source| Error::Hash {
        path: path.to_path_buf(),
        source,
    })
}

fn digest_contents(path: &Path) -> io::Result<Digest> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = blake3::Hasher::new();

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Digest(*hasher.finalize().as_bytes()))
}

// ============================================================================
// TESTS
// ============================================================================
