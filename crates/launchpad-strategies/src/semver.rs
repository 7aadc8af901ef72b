//! Semantic version value type
//!
//! Follows the SemVer 2.0.0 precedence rules: https://semver.org/

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use launchpad_core::error::{Result, VersionError};

use crate::types::BumpDirective;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+(.+))?$",
    )
    .expect("Invalid regex")
});

/// One dot-separated token of a prerelease segment
///
/// Numeric identifiers sort before alphanumeric ones, so the derived
/// ordering already matches SemVer precedence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrereleaseIdentifier {
    /// Digits only, compared as an integer
    Numeric(u64),
    /// Anything else, compared lexically in ASCII order
    AlphaNumeric(String),
}

impl PrereleaseIdentifier {
    fn parse(raw: &str, input: &str) -> Result<Self> {
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::AlphaNumeric(raw.to_string()));
        }

        if raw.len() > 1 && raw.starts_with('0') {
            return Err(VersionError::ParseFailed(
                input.to_string(),
                format!("numeric prerelease identifier '{}' has a leading zero", raw),
            )
            .into());
        }

        raw.parse().map(Self::Numeric).map_err(|_| {
            VersionError::ParseFailed(
                input.to_string(),
                format!("prerelease identifier '{}' is out of range", raw),
            )
            .into()
        })
    }
}

impl fmt::Display for PrereleaseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// An immutable semantic version
///
/// Equality is structural and includes build metadata. Ordering follows
/// precedence first and only falls back to build metadata to break ties, so
/// `Ord` stays consistent with `Eq`. Use [`SemanticVersion::compare`] or
/// [`SemanticVersion::precedence_eq`] when metadata must be ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Prerelease identifiers, empty for a release
    pub prerelease: Vec<PrereleaseIdentifier>,
    /// Build metadata, never part of precedence
    pub build_metadata: Option<String>,
}

impl SemanticVersion {
    /// Create a release version with no prerelease or metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build_metadata: None,
        }
    }

    /// Set the prerelease segment, e.g. `"rc.1"`
    pub fn with_prerelease(mut self, prerelease: &str) -> Result<Self> {
        self.prerelease = prerelease
            .split('.')
            .map(|id| {
                if id.is_empty() || !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
                    Err(VersionError::ParseFailed(
                        prerelease.to_string(),
                        "invalid prerelease identifier".to_string(),
                    )
                    .into())
                } else {
                    PrereleaseIdentifier::parse(id, prerelease)
                }
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Set build metadata
    pub fn with_build_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.build_metadata = Some(metadata.into());
        self
    }

    /// Parse a canonical version string (no leading `v`)
    pub fn parse(input: &str) -> Result<Self> {
        let caps = VERSION_REGEX.captures(input).ok_or_else(|| {
            VersionError::ParseFailed(
                input.to_string(),
                "expected MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]".to_string(),
            )
        })?;

        let component = |idx: usize, name: &str| -> Result<u64> {
            caps[idx].parse().map_err(|_| {
                VersionError::ParseFailed(input.to_string(), format!("{} is out of range", name))
                    .into()
            })
        };

        let prerelease = match caps.get(4) {
            Some(pre) => pre
                .as_str()
                .split('.')
                .map(|id| PrereleaseIdentifier::parse(id, input))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            major: component(1, "major")?,
            minor: component(2, "minor")?,
            patch: component(3, "patch")?,
            prerelease,
            build_metadata: caps.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Parse a version taken from a git tag, allowing a single leading `v`
    pub fn parse_tag(tag: &str) -> Result<Self> {
        Self::parse(tag.strip_prefix('v').unwrap_or(tag))
    }

    /// Compare by precedence, ignoring build metadata
    pub fn compare(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.prerelease.cmp(&other.prerelease),
            })
    }

    /// Whether two versions have equal precedence
    pub fn precedence_eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Whether this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Next major version
    pub fn bump_major(&self) -> Self {
        Self::new(self.major.saturating_add(1), 0, 0)
    }

    /// Next minor version
    pub fn bump_minor(&self) -> Self {
        Self::new(self.major, self.minor.saturating_add(1), 0)
    }

    /// Next patch version
    pub fn bump_patch(&self) -> Self {
        Self::new(self.major, self.minor, self.patch.saturating_add(1))
    }

    /// Apply a bump directive, validating explicit overrides
    pub fn apply(&self, directive: &BumpDirective) -> Result<Self> {
        let next = match directive {
            BumpDirective::Major => self.bump_major(),
            BumpDirective::Minor => self.bump_minor(),
            BumpDirective::Patch => self.bump_patch(),
            BumpDirective::Explicit(v) => Self::parse(v)?,
        };
        debug!(from = %self, to = %next, %directive, "applied bump directive");
        Ok(next)
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
            .then_with(|| self.build_metadata.cmp(&other.build_metadata))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if !self.prerelease.is_empty() {
            let ids: Vec<String> = self.prerelease.iter().map(ToString::to_string).collect();
            write!(f, "-{}", ids.join("."))?;
        }

        if let Some(build) = &self.build_metadata {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = launchpad_core::LaunchpadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
