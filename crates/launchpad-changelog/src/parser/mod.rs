//! Commit parsing

mod conventional;

pub use conventional::{parse_subject, ConventionalParser, ParsedSubject};

use crate::types::CommitRecord;
use launchpad_git::CommitInfo;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit from the history feed, or `None` when it is skipped
    fn parse(&self, commit: &CommitInfo) -> Option<CommitRecord>;
}

/// Configuration for the commit parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Whether to include merge commits
    pub include_merges: bool,
}

impl ParserConfig {
    /// Set whether to include merge commits
    pub fn with_merges(mut self, include: bool) -> Self {
        self.include_merges = include;
        self
    }
}
