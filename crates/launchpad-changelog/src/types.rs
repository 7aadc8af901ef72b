//! Changelog types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A commit after subject-line parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash
    pub hash: String,
    /// Original subject line
    pub subject: String,
    /// Author name
    pub author: String,
    /// Commit timestamp
    pub date: DateTime<Utc>,
    /// Conventional type (`feat`, `fix`, ...), or `misc` for free-form subjects
    pub commit_type: String,
    /// Scope from `type(scope): ...`
    pub scope: Option<String>,
    /// Description after the colon, or the whole subject
    pub description: String,
    /// Marked breaking with `!` before the colon
    pub breaking: bool,
}

impl CommitRecord {
    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

/// Changelog section categories, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Commits marked breaking
    Breaking,
    /// `feat`, `feature`
    Feat,
    /// `fix`, `bugfix`
    Fix,
    /// `docs`, `doc`
    Docs,
    /// `chore`, `build`, `ci`
    Maintenance,
    /// Everything else, including free-form subjects
    Other,
}

impl SectionKind {
    /// All kinds in emission order
    pub fn all() -> &'static [SectionKind] {
        &[
            Self::Breaking,
            Self::Feat,
            Self::Fix,
            Self::Docs,
            Self::Maintenance,
            Self::Other,
        ]
    }

    /// Heading used when rendering
    pub fn title(&self) -> &'static str {
        match self {
            Self::Breaking => "Breaking Changes",
            Self::Feat => "Features",
            Self::Fix => "Bug Fixes",
            Self::Docs => "Documentation",
            Self::Maintenance => "Maintenance",
            Self::Other => "Other Changes",
        }
    }

    /// Position in the rendered changelog, lowest first
    pub fn priority(&self) -> u8 {
        match self {
            Self::Breaking => 0,
            Self::Feat => 1,
            Self::Fix => 2,
            Self::Docs => 3,
            Self::Maintenance => 4,
            Self::Other => 5,
        }
    }

    /// Section a commit type belongs to, ignoring the breaking marker
    pub fn for_commit_type(commit_type: &str) -> Self {
        match commit_type {
            "feat" | "feature" => Self::Feat,
            "fix" | "bugfix" => Self::Fix,
            "docs" | "doc" => Self::Docs,
            "chore" | "build" | "ci" => Self::Maintenance,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// One rendered section of a changelog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogSection {
    /// Category
    pub kind: SectionKind,
    /// Position in the changelog, lowest first
    pub priority: u8,
    /// Commits in input order
    pub commits: Vec<CommitRecord>,
}

impl ChangelogSection {
    /// Create an empty section
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            priority: kind.priority(),
            commits: Vec::new(),
        }
    }

    /// Section heading
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Add a commit to the section
    pub fn add_commit(&mut self, commit: CommitRecord) {
        self.commits.push(commit);
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// A categorized changelog for one version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changelog {
    /// Version string
    pub version: String,
    /// Release date
    pub date: NaiveDate,
    /// Non-empty sections, ordered by priority
    pub sections: Vec<ChangelogSection>,
}

impl Changelog {
    /// Create a changelog with no sections
    pub fn new(version: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            version: version.into(),
            date,
            sections: Vec::new(),
        }
    }

    /// Look up a section by kind
    pub fn section(&self, kind: SectionKind) -> Option<&ChangelogSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Check if the changelog lists no commits
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(ChangelogSection::is_empty)
    }
}
