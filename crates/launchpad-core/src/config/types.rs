//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::{BuildStrategy, ManifestFormat};

/// Main configuration for Launchpad
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Manifests to read from and write to
    pub manifests: ManifestsConfig,
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Tag format (e.g., "v{version}")
    pub tag_format: String,

    /// How build numbers are derived when not given explicitly
    pub build_strategy: BuildStrategy,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            tag_format: "v{version}".to_string(),
            build_strategy: BuildStrategy::default(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,

    /// Branch pushed after committing
    pub branch: String,

    /// Whether to commit touched manifests
    pub commit: bool,

    /// Whether to create an annotated tag
    pub tag: bool,

    /// Whether to push the commit and tag
    pub push: bool,

    /// Commit message template
    pub commit_message: String,

    /// Annotated tag message template
    pub tag_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            commit: true,
            tag: false,
            push: false,
            commit_message: "chore(release): bump version to {version}+{build}".to_string(),
            tag_message: "Release {version}".to_string(),
        }
    }
}

/// Which changelog sections are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionToggles {
    /// Breaking changes
    pub breaking: bool,
    /// Features
    pub feat: bool,
    /// Bug fixes
    pub fix: bool,
    /// Documentation
    pub docs: bool,
    /// Chores, build and CI changes
    pub maintenance: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            breaking: true,
            feat: true,
            fix: true,
            docs: false,
            maintenance: false,
        }
    }
}

impl SectionToggles {
    /// Every section enabled
    pub fn all() -> Self {
        Self {
            breaking: true,
            feat: true,
            fix: true,
            docs: true,
            maintenance: true,
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Repository URL used for commit links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    /// Enabled sections
    pub sections: SectionToggles,

    /// List breaking commits under their type section as well
    pub dual_list_breaking: bool,

    /// Whether to include merge commits
    pub include_merges: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            repo_url: None,
            sections: SectionToggles::default(),
            dual_list_breaking: true,
            include_merges: false,
        }
    }
}

/// A manifest the synchronizer writes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTargetConfig {
    /// Path relative to the project root
    pub path: PathBuf,

    /// Manifest format; inferred from the file name when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ManifestFormat>,

    /// Whether this target is written at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether a failure on this target aborts the release
    #[serde(default)]
    pub required: bool,
}

fn default_true() -> bool {
    true
}

impl ManifestTargetConfig {
    /// Create an enabled, optional target
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
            enabled: true,
            required: false,
        }
    }

    /// Set the format explicitly
    pub fn with_format(mut self, format: ManifestFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Mark the target as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set whether the target is enabled
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The configured format, or the one inferred from the file name
    pub fn resolved_format(&self) -> Option<ManifestFormat> {
        self.format.or_else(|| ManifestFormat::detect(&self.path))
    }
}

/// Manifest sources and targets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestsConfig {
    /// Manifests read for the current version, first match wins
    pub sources: Vec<PathBuf>,

    /// Manifests written with the new version
    pub targets: Vec<ManifestTargetConfig>,
}

impl Default for ManifestsConfig {
    fn default() -> Self {
        Self {
            sources: vec![PathBuf::from("pubspec.yaml"), PathBuf::from("package.json")],
            targets: vec![
                ManifestTargetConfig::new("pubspec.yaml").required(),
                ManifestTargetConfig::new("package.json"),
                ManifestTargetConfig::new("ios/Runner/Info.plist"),
                ManifestTargetConfig::new("android/app/build.gradle"),
            ],
        }
    }
}

impl ManifestsConfig {
    /// Targets that are enabled, in configured order
    pub fn enabled_targets(&self) -> impl Iterator<Item = &ManifestTargetConfig> {
        self.targets.iter().filter(|t| t.enabled)
    }

    /// Resolve source paths against a project root
    pub fn source_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.sources.iter().map(|s| root.join(s)).collect()
    }
}
