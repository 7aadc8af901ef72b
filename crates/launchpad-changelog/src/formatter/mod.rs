//! Changelog formatters

mod markdown;
mod registry;
mod release_notes;

pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;
pub use release_notes::ReleaseNotesFormatter;

use crate::types::{Changelog, CommitRecord};

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a changelog to string
    fn format(&self, changelog: &Changelog) -> String;

    /// Name the formatter is selected by
    fn name(&self) -> &'static str;
}

/// Link target for a commit: `<repo_url>/commit/<hash>`, or a relative
/// `../../commit/<hash>` when no repository URL is known
pub fn commit_link(repo_url: Option<&str>, hash: &str) -> String {
    match repo_url {
        Some(url) => format!("{}/commit/{}", url.trim_end_matches('/'), hash),
        None => format!("../../commit/{}", hash),
    }
}

/// One bullet's text: `[**scope:** ]description ([short](link))`
pub fn render_entry(commit: &CommitRecord, repo_url: Option<&str>) -> String {
    let mut entry = String::new();
    if let Some(scope) = &commit.scope {
        entry.push_str(&format!("**{}:** ", scope));
    }
    entry.push_str(&commit.description);
    entry.push_str(&format!(
        " ([{}]({}))",
        commit.short_hash(),
        commit_link(repo_url, &commit.hash)
    ));
    entry
}
