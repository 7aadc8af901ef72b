//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::{render_entry, ChangelogFormatter};
use crate::types::Changelog;

/// Markdown changelog formatter
///
/// Renders a `## [version] - date` heading followed by one `###` block per
/// section.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    /// Repository URL for commit links
    pub repo_url: Option<String>,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set repository URL for links
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, changelog), fields(version = %changelog.version, section_count = changelog.sections.len()))]
    fn format(&self, changelog: &Changelog) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "## [{}] - {}\n",
            changelog.version,
            changelog.date.format("%Y-%m-%d")
        ));

        for section in &changelog.sections {
            if section.is_empty() {
                continue;
            }

            output.push_str(&format!("\n### {}\n\n", section.title()));
            for commit in &section.commits {
                output.push_str(&format!(
                    "- {}\n",
                    render_entry(commit, self.repo_url.as_deref())
                ));
            }
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}
