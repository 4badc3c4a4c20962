use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{AckError, Result};

/// Replace `destination` with `contents` in one step.
///
/// The text is written to a temporary file next to the destination and then
/// renamed over it, so readers see either the previous file or the new one.
pub fn write_atomic(destination: &Path, contents: &str) -> Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AckError::filesystem(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| AckError::filesystem(tmp.path(), e))?;
    tmp.persist(destination)
        .map_err(|e| AckError::filesystem(destination, e.error))?;

    tracing::info!(path = %destination.display(), bytes = contents.len(), "wrote acknowledgments");
    Ok(())
}
