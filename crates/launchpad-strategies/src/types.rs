//! Version bump types

use serde::{Deserialize, Serialize};

/// How the next version is derived from the current one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpDirective {
    /// Breaking change bump (x.0.0)
    Major,
    /// Feature bump (0.x.0)
    Minor,
    /// Fix bump (0.0.x)
    Patch,
    /// Use this exact version instead of bumping
    Explicit(String),
}

impl BumpDirective {
    /// Returns the string representation of the directive kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::Explicit(_) => "explicit",
        }
    }
}

impl std::fmt::Display for BumpDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(v) => write!(f, "explicit {}", v),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl std::str::FromStr for BumpDirective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" | "breaking" => Ok(Self::Major),
            "minor" | "feature" => Ok(Self::Minor),
            "patch" | "fix" => Ok(Self::Patch),
            "" => Err("Empty bump directive".to_string()),
            _ => Ok(Self::Explicit(s.to_string())),
        }
    }
}
