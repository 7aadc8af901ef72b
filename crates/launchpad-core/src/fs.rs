//! Filesystem helpers

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

/// Replace a file's contents atomically
///
/// The content goes to a temp file in the destination directory which is
/// then renamed over the target, so readers never observe a partial file.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    // Temp files are created owner-only; keep the target's mode
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
    Ok(())
}
