//! # Latest Ledger Selection
//!
//! "Latest" is the lexicographically greatest filename (byte order) in the
//! data directory that matches the configured glob. Modification times are
//! never consulted, so the choice is reproducible from a directory listing.
//!
//! The selected file is read once. Callers hash and parse the same bytes,
//! so an artifact hash always describes exactly what was scored even if
//! the file is replaced mid-request.

use std::path::{Path, PathBuf};

use fort_core::FortError;

/// A selected ledger and its raw bytes.
#[derive(Debug, Clone)]
pub struct LatestInput {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Find the latest matching file in `dir`.
///
/// # Errors
///
/// - [`FortError::NotFound`] if `dir` does not exist or nothing matches.
/// - [`FortError::Io`] for other directory read failures.
pub fn select_latest(dir: &Path, pattern: &glob::Pattern) -> Result<PathBuf, FortError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(no_match(dir, pattern));
        }
        Err(e) => return Err(e.into()),
    };

    let mut best: Option<(String, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !pattern.matches(&name) || !entry.path().is_file() {
            continue;
        }
        if best.as_ref().map_or(true, |(b, _)| name.as_bytes() > b.as_bytes()) {
            best = Some((name, entry.path()));
        }
    }
    best.map(|(_, path)| path).ok_or_else(|| no_match(dir, pattern))
}

/// Select the latest file and read its bytes.
pub fn read_latest(dir: &Path, pattern: &glob::Pattern) -> Result<LatestInput, FortError> {
    let path = select_latest(dir, pattern)?;
    let bytes = std::fs::read(&path)?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "selected latest ledger");
    Ok(LatestInput { path, bytes })
}

fn no_match(dir: &Path, pattern: &glob::Pattern) -> FortError {
    FortError::NotFound(format!("no {} in {}", pattern.as_str(), dir.display()))
}
