//! Changelog command

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, ValueEnum};
use console::style;
use tracing::{debug, info};

use launchpad_changelog::{prepend_to_file, ChangelogGenerator, FormatterRegistry};
use launchpad_git::GitRepo;

use crate::cli::output::{self, path_style};
use crate::cli::{Cli, OutputFormat, Project};

/// Changelog rendering styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ChangelogStyle {
    /// Versioned Markdown section with headings
    #[default]
    Markdown,
    /// Flat bullet list for store release notes
    ReleaseNotes,
}

impl ChangelogStyle {
    /// Formatter name in the registry
    pub fn formatter_name(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::ReleaseNotes => "release-notes",
        }
    }
}

/// Generate a changelog from commit history
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Start of the range, exclusive (defaults to the latest version tag)
    #[arg(long, value_name = "REV")]
    pub since: Option<String>,

    /// End of the range, inclusive (defaults to HEAD)
    #[arg(long, value_name = "REV")]
    pub until: Option<String>,

    /// Rendering style
    #[arg(long, value_enum, default_value = "markdown")]
    pub output_format: ChangelogStyle,

    /// Version to generate changelog for
    #[arg(long = "for-version", value_name = "VERSION")]
    pub for_version: Option<String>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            since = ?self.since,
            until = ?self.until,
            style = ?self.output_format,
            version = ?self.for_version,
            write = self.write,
            "executing changelog command"
        );
        let cwd = std::env::current_dir()?;
        let project = Project::load(&cwd)?;
        let config = &project.config;

        let repo = GitRepo::discover(&cwd)?;

        let commits = match &self.since {
            Some(since) => repo.commits_in_range(Some(since), self.until.as_deref())?,
            None => repo.commits_since_release(&config.versioning.tag_format, self.until.as_deref())?,
        };

        let repo_url = match &config.changelog.repo_url {
            Some(url) => Some(url.clone()),
            None => repo.remote_web_url(&config.git.remote).unwrap_or_else(|e| {
                debug!(error = %e, "no remote URL for commit links");
                None
            }),
        };

        let registry = FormatterRegistry::with_repo_url(repo_url.as_deref());
        let formatter = registry
            .get(self.output_format.formatter_name())
            .ok_or_else(|| anyhow::anyhow!("Unknown changelog format: {:?}", self.output_format))?;

        let version = self
            .for_version
            .clone()
            .unwrap_or_else(|| "Unreleased".to_string());
        let generator = ChangelogGenerator::new(&config.changelog);
        let changelog = generator.generate(&version, Utc::now().date_naive(), &commits);

        if changelog.is_empty() {
            if cli.chatty() {
                println!("{}", style("No changes to report since last release.").yellow());
            }
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&changelog)?);
            }
            return Ok(());
        }

        let rendered = formatter.format(&changelog);

        if self.write {
            let output_path = self
                .output
                .clone()
                .unwrap_or_else(|| project.root.join(&config.changelog.file));
            prepend_to_file(&output_path, &rendered)?;

            if cli.chatty() {
                output::success(&format!(
                    "Changelog written to {}",
                    path_style().apply_to(output_path.display())
                ));
            }
        } else {
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&changelog)?),
                OutputFormat::Text => print!("{}", rendered),
            }
        }

        Ok(())
    }
}
