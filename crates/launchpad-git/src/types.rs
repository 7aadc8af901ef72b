//! Git types

use chrono::{DateTime, Utc};
use launchpad_strategies::SemanticVersion;
use serde::{Deserialize, Serialize};

/// A commit from the history feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Subject line
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Number of parents; more than one for merge commits
    pub parent_count: usize,
}

impl CommitInfo {
    /// Create a new CommitInfo with a single parent
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
            parent_count: 1,
        }
    }

    /// Set the number of parents
    pub fn with_parent_count(mut self, parent_count: usize) -> Self {
        self.parent_count = parent_count;
        self
    }

    /// Whether this commit merges two or more lines of history
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

/// A tag and the commit it points to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Version parsed from the tag name, if it follows the tag format
    pub version: Option<SemanticVersion>,
}

impl TagInfo {
    /// Create a new TagInfo, parsing the version with the given tag format
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>, tag_format: &str) -> Self {
        let name = name.into();
        let version = version_from_tag(&name, tag_format);

        Self {
            name,
            commit_hash: commit_hash.into(),
            message: None,
            version,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Extract a version from a tag name shaped by `tag_format` (e.g. `v{version}`)
///
/// Formats without a `{version}` placeholder fall back to an optional
/// leading `v`.
pub fn version_from_tag(tag: &str, tag_format: &str) -> Option<SemanticVersion> {
    match tag_format.split_once("{version}") {
        Some((prefix, suffix)) => {
            let inner = tag.strip_prefix(prefix)?.strip_suffix(suffix)?;
            SemanticVersion::parse(inner).ok()
        }
        None => SemanticVersion::parse_tag(tag).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_tag() {
        let v = |s: &str| SemanticVersion::parse(s).unwrap();
        assert_eq!(version_from_tag("v1.0.0", "v{version}"), Some(v("1.0.0")));
        assert_eq!(version_from_tag("1.0.0", "{version}"), Some(v("1.0.0")));
        assert_eq!(version_from_tag("app@2.1.0", "app@{version}"), Some(v("2.1.0")));
        assert_eq!(
            version_from_tag("release-3.0.0-rc.1", "release-{version}"),
            Some(v("3.0.0-rc.1"))
        );
        assert_eq!(version_from_tag("1.0.0", "v{version}"), None);
        assert_eq!(version_from_tag("v1.0", "v{version}"), None);
        assert_eq!(version_from_tag("not-a-version", "v{version}"), None);
    }

    #[test]
    fn test_commit_info() {
        let commit = CommitInfo::new(
            "abc1234567890",
            "feat: add feature",
            "Author",
            "author@example.com",
            Utc::now(),
        );
        assert_eq!(commit.short_hash, "abc1234");
        assert!(!commit.is_merge());
        assert!(commit.with_parent_count(2).is_merge());
    }
}
