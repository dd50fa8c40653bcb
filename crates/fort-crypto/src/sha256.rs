//! # SHA-256 Artifact Hashing
//!
//! Content-addresses raw input artifacts. The hash is taken over the file
//! bytes exactly as persisted, with no normalization of line endings,
//! whitespace, or CSV layout. Re-saving a ledger with a different editor
//! therefore yields a different artifact hash, which is the point: the
//! attestation names one exact byte string.

use std::path::Path;

use fort_core::{FortError, Hash32};
use sha2::{Digest, Sha256};

/// Compute the artifact hash of raw bytes.
pub fn artifact_hash(bytes: &[u8]) -> Hash32 {
    Hash32::from_bytes(Sha256::digest(bytes).into())
}

/// Compute the artifact hash as lower-case hex.
pub fn artifact_hash_hex(bytes: &[u8]) -> String {
    artifact_hash(bytes).to_hex()
}

/// Read a file and hash its bytes.
pub fn artifact_hash_file(path: &Path) -> Result<Hash32, FortError> {
    let bytes = std::fs::read(path)?;
    Ok(artifact_hash(&bytes))
}
