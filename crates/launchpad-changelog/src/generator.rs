//! Changelog generation

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use launchpad_core::config::ChangelogConfig;
use launchpad_git::CommitInfo;

use crate::aggregator::ChangelogAggregator;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::parser::{CommitParser, ConventionalParser, ParserConfig};
use crate::types::{Changelog, CommitRecord};

/// Changelog generator
///
/// Runs the commit feed through the parser and the aggregator, then renders
/// the result with the configured formatter.
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    aggregator: ChangelogAggregator,
    formatter: Box<dyn ChangelogFormatter>,
}

impl ChangelogGenerator {
    /// Create a new generator with the conventional parser and markdown output
    pub fn new(config: &ChangelogConfig) -> Self {
        let parser =
            ConventionalParser::with_config(ParserConfig::default().with_merges(config.include_merges));
        let mut formatter = MarkdownFormatter::new();
        if let Some(url) = &config.repo_url {
            formatter = formatter.with_repo_url(url);
        }

        Self {
            parser: Box::new(parser),
            aggregator: ChangelogAggregator::from_config(config),
            formatter: Box::new(formatter),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Parse commits from the history feed, dropping skipped ones
    pub fn parse(&self, commits: &[CommitInfo]) -> Vec<CommitRecord> {
        commits.iter().filter_map(|c| self.parser.parse(c)).collect()
    }

    /// Generate a changelog from commits
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, version: &str, date: NaiveDate, commits: &[CommitInfo]) -> Changelog {
        info!(version, commit_count = commits.len(), "generating changelog");
        let records = self.parse(commits);
        debug!(parsed = records.len(), skipped = commits.len() - records.len(), "commits parsed");
        self.aggregator.aggregate(version, date, &records)
    }

    /// Format a changelog to string
    pub fn format(&self, changelog: &Changelog) -> String {
        self.formatter.format(changelog)
    }

    /// Generate and format in one step
    pub fn generate_formatted(&self, version: &str, date: NaiveDate, commits: &[CommitInfo]) -> String {
        let changelog = self.generate(version, date, commits);
        self.format(&changelog)
    }
}
