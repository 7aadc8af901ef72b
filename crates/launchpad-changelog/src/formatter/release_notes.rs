//! Flat release notes formatter
//!
//! Produces a single bullet list without headings, suitable for store
//! "What's new" fields and GitHub release bodies.

use tracing::{debug, instrument};

use super::{render_entry, ChangelogFormatter};
use crate::types::{Changelog, SectionKind};

/// Prefix marking breaking entries
const BREAKING_PREFIX: &str = "**BREAKING:** ";

/// Release notes formatter
#[derive(Debug, Clone, Default)]
pub struct ReleaseNotesFormatter {
    /// Repository URL for commit links
    pub repo_url: Option<String>,
}

impl ReleaseNotesFormatter {
    /// Create a new release notes formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set repository URL for links
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }
}

impl ChangelogFormatter for ReleaseNotesFormatter {
    #[instrument(skip(self, changelog), fields(version = %changelog.version))]
    fn format(&self, changelog: &Changelog) -> String {
        let breaking_listed = changelog.section(SectionKind::Breaking).is_some();
        let mut output = String::new();

        for section in &changelog.sections {
            for commit in &section.commits {
                // Dual-listed commits appear once, under Breaking Changes
                if section.kind != SectionKind::Breaking && commit.breaking && breaking_listed {
                    continue;
                }

                output.push_str("- ");
                if commit.breaking {
                    output.push_str(BREAKING_PREFIX);
                }
                output.push_str(&render_entry(commit, self.repo_url.as_deref()));
                output.push('\n');
            }
        }

        debug!(output_len = output.len(), "release notes formatted");
        output
    }

    fn name(&self) -> &'static str {
        "release-notes"
    }
}
