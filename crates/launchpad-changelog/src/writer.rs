//! Writing rendered changelogs to disk

use std::path::Path;

use tracing::{info, instrument};

use launchpad_core::error::{ChangelogError, Result};
use launchpad_core::fs::write_atomic;

/// Title used when creating a new changelog file
pub const DEFAULT_TITLE: &str = "# Changelog";

/// Insert a rendered fragment below the document title
///
/// Content without a top-level `# ` title gets the fragment at the very top;
/// empty or missing content starts a new document.
pub fn prepend_fragment(existing: Option<&str>, fragment: &str) -> String {
    let fragment = fragment.trim_end();

    let content = match existing {
        Some(content) if !content.trim().is_empty() => content,
        _ => return format!("{}\n\n{}\n", DEFAULT_TITLE, fragment),
    };

    if !content.starts_with("# ") {
        return format!("{}\n\n{}", fragment, content);
    }

    let (title, rest) = content.split_once('\n').unwrap_or((content, ""));
    let rest = rest.trim_start_matches(['\n', '\r']);
    if rest.is_empty() {
        format!("{}\n\n{}\n", title.trim_end(), fragment)
    } else {
        format!("{}\n\n{}\n\n{}", title.trim_end(), fragment, rest)
    }
}

/// Prepend a rendered fragment to a changelog file, creating it if absent
#[instrument(skip(fragment), fields(path = %path.display()))]
pub fn prepend_to_file(path: &Path, fragment: &str) -> Result<()> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(ChangelogError::Io(e).into()),
    };

    let updated = prepend_fragment(existing.as_deref(), fragment);
    write_atomic(path, updated.as_bytes()).map_err(|e| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(created = existing.is_none(), "changelog updated");
    Ok(())
}
