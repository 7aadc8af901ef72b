//! Conventional Commits parser
//!
//! Parses subject lines following the Conventional Commits format:
//! https://www.conventionalcommits.org/
//!
//! Only the subject is inspected; `BREAKING CHANGE:` footers in the body
//! are not considered.

use regex::Regex;
use std::sync::LazyLock;

use super::{CommitParser, ParserConfig};
use crate::types::CommitRecord;
use launchpad_git::CommitInfo;

/// Type assigned to subjects that do not follow the convention
pub const UNTYPED_COMMIT: &str = "misc";

/// Regex for parsing conventional commit subjects
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[a-z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$")
        .expect("Invalid regex")
});

/// Fields extracted from a subject line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSubject {
    /// Commit type, `misc` when the subject is free-form
    pub commit_type: String,
    /// Optional scope
    pub scope: Option<String>,
    /// Description after the colon, or the whole subject
    pub description: String,
    /// `!` right before the colon
    pub breaking: bool,
}

/// Parse a subject line; only the first line of multi-line input is used
pub fn parse_subject(message: &str) -> ParsedSubject {
    let subject = message.lines().next().unwrap_or("");

    match CONVENTIONAL_REGEX.captures(subject) {
        Some(caps) => ParsedSubject {
            commit_type: caps["type"].to_string(),
            scope: caps.name("scope").map(|m| m.as_str().to_string()),
            description: caps["description"].to_string(),
            breaking: caps.name("breaking").is_some(),
        },
        None => ParsedSubject {
            commit_type: UNTYPED_COMMIT.to_string(),
            scope: None,
            description: subject.to_string(),
            breaking: false,
        },
    }
}

/// Parser for Conventional Commits format
#[derive(Debug, Clone, Default)]
pub struct ConventionalParser {
    config: ParserConfig,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    fn is_merge(commit: &CommitInfo) -> bool {
        commit.is_merge() || commit.message.starts_with("Merge ")
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &CommitInfo) -> Option<CommitRecord> {
        if !self.config.include_merges && Self::is_merge(commit) {
            return None;
        }

        let parsed = parse_subject(&commit.message);

        Some(CommitRecord {
            hash: commit.hash.clone(),
            subject: commit.message.lines().next().unwrap_or("").to_string(),
            author: commit.author.clone(),
            date: commit.timestamp,
            commit_type: parsed.commit_type,
            scope: parsed.scope,
            description: parsed.description,
            breaking: parsed.breaking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_commit(message: &str) -> CommitInfo {
        CommitInfo::new(
            "abc1234567890",
            message,
            "Test Author",
            "test@example.com",
            Utc::now(),
        )
    }

    #[test]
    fn test_parse_simple_feat() {
        let parsed = parse_subject("feat: add new feature");

        assert_eq!(parsed.commit_type, "feat");
        assert_eq!(parsed.description, "add new feature");
        assert!(parsed.scope.is_none());
        assert!(!parsed.breaking);
    }

    #[test]
    fn test_parse_with_scope() {
        let parsed = parse_subject("fix(parser): handle edge case");

        assert_eq!(parsed.commit_type, "fix");
        assert_eq!(parsed.scope, Some("parser".to_string()));
        assert_eq!(parsed.description, "handle edge case");
    }

    #[test]
    fn test_parse_breaking_change_marker() {
        let parsed = parse_subject("feat!: drop legacy endpoints");
        assert!(parsed.breaking);
        assert_eq!(parsed.description, "drop legacy endpoints");
    }

    #[test]
    fn test_parse_breaking_with_scope() {
        let parsed = parse_subject("refactor(core)!: major refactoring");

        assert_eq!(parsed.commit_type, "refactor");
        assert_eq!(parsed.scope, Some("core".to_string()));
        assert!(parsed.breaking);
    }

    #[test]
    fn test_parse_non_conventional() {
        let parsed = parse_subject("Update README");

        assert_eq!(parsed.commit_type, "misc");
        assert_eq!(parsed.description, "Update README");
        assert!(parsed.scope.is_none());
        assert!(!parsed.breaking);
    }

    #[test]
    fn test_uppercase_type_is_not_conventional() {
        let parsed = parse_subject("Feat: shout");
        assert_eq!(parsed.commit_type, "misc");
        assert_eq!(parsed.description, "Feat: shout");
    }

    #[test]
    fn test_missing_space_after_colon() {
        assert_eq!(parse_subject("fix:no space").commit_type, "misc");
    }

    #[test]
    fn test_marker_must_precede_colon() {
        let parsed = parse_subject("feat: wow!");
        assert!(!parsed.breaking);
        assert_eq!(parsed.description, "wow!");
    }

    #[test]
    fn test_only_first_line_is_used() {
        let parsed = parse_subject("fix: real subject\n\nBREAKING CHANGE: ignored");
        assert_eq!(parsed.description, "real subject");
        assert!(!parsed.breaking);
    }

    #[test]
    fn test_parse_commit_record() {
        let parser = ConventionalParser::new();
        let record = parser.parse(&make_commit("feat(auth): add login")).unwrap();

        assert_eq!(record.hash, "abc1234567890");
        assert_eq!(record.subject, "feat(auth): add login");
        assert_eq!(record.author, "Test Author");
        assert_eq!(record.commit_type, "feat");
        assert_eq!(record.scope.as_deref(), Some("auth"));
    }

    #[test]
    fn test_merges_skipped_by_default() {
        let parser = ConventionalParser::new();
        assert!(parser.parse(&make_commit("Merge branch 'dev'")).is_none());
        assert!(parser
            .parse(&make_commit("feat: merged").with_parent_count(2))
            .is_none());

        let parser = ConventionalParser::with_config(ParserConfig::default().with_merges(true));
        let record = parser.parse(&make_commit("Merge branch 'dev'")).unwrap();
        assert_eq!(record.commit_type, "misc");
    }
}
