//! Version propagation across platform manifests

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use launchpad_core::config::ManifestTargetConfig;
use launchpad_core::error::{ManifestError, Result, VersionError};
use launchpad_core::fs::write_atomic;
use launchpad_core::ManifestFormat;
use launchpad_strategies::{BuildNumber, SemanticVersion};

use crate::registry::AdapterRegistry;
use crate::traits::ManifestVersion;

/// A manifest file the synchronizer writes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestTarget {
    /// File path
    pub path: PathBuf,
    /// Manifest format
    pub format: ManifestFormat,
    /// Whether a failure aborts synchronization
    pub required: bool,
}

impl ManifestTarget {
    /// Create an optional target
    pub fn new(path: impl Into<PathBuf>, format: ManifestFormat) -> Self {
        Self {
            path: path.into(),
            format,
            required: false,
        }
    }

    /// Mark the target as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Build a target from configuration, resolving its path against `root`
    pub fn from_config(root: &Path, config: &ManifestTargetConfig) -> Result<Self> {
        let format = config
            .resolved_format()
            .ok_or_else(|| ManifestError::UnknownFormat(config.path.clone()))?;

        Ok(Self {
            path: root.join(&config.path),
            format,
            required: config.required,
        })
    }
}

/// What happened to one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum TargetStatus {
    /// The file was rewritten
    Updated,
    /// The file already carried the version
    Unchanged,
    /// The file does not exist
    Absent,
    /// An optional target could not be updated
    Failed(String),
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Absent => write!(f, "absent"),
            Self::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Result of synchronizing one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOutcome {
    /// File path
    pub path: PathBuf,
    /// Manifest format
    pub format: ManifestFormat,
    /// Outcome
    #[serde(flatten)]
    pub status: TargetStatus,
}

impl TargetOutcome {
    /// Whether the file content changed (or would change in a preview)
    pub fn is_updated(&self) -> bool {
        self.status == TargetStatus::Updated
    }
}

/// The current version as read from a source manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    /// Manifest the version came from
    pub path: PathBuf,
    /// Manifest format
    pub format: ManifestFormat,
    /// Parsed version
    pub version: SemanticVersion,
    /// Build number stored next to it, if any
    pub build_number: Option<BuildNumber>,
}

/// Applies a version to an ordered list of manifest targets
pub struct ManifestSynchronizer {
    registry: AdapterRegistry,
}

impl ManifestSynchronizer {
    /// Create a synchronizer with the built-in adapters
    pub fn new() -> Self {
        Self::with_registry(AdapterRegistry::new())
    }

    /// Create a synchronizer with a custom adapter registry
    pub fn with_registry(registry: AdapterRegistry) -> Self {
        Self { registry }
    }

    /// Write the version to every target, in order
    ///
    /// Optional target faults are recorded as [`TargetStatus::Failed`] and
    /// the remaining targets are still processed. A required target fault
    /// stops immediately; files already written stay written.
    #[instrument(skip(self, targets), fields(targets = targets.len(), %version))]
    pub fn apply(
        &self,
        targets: &[ManifestTarget],
        version: &SemanticVersion,
        build: Option<BuildNumber>,
    ) -> Result<Vec<TargetOutcome>> {
        self.run(targets, version, build, true)
    }

    /// Report what [`apply`](Self::apply) would do without writing anything
    #[instrument(skip(self, targets), fields(targets = targets.len(), %version))]
    pub fn preview(
        &self,
        targets: &[ManifestTarget],
        version: &SemanticVersion,
        build: Option<BuildNumber>,
    ) -> Result<Vec<TargetOutcome>> {
        self.run(targets, version, build, false)
    }

    fn run(
        &self,
        targets: &[ManifestTarget],
        version: &SemanticVersion,
        build: Option<BuildNumber>,
        write: bool,
    ) -> Result<Vec<TargetOutcome>> {
        let mut outcomes = Vec::with_capacity(targets.len());

        for target in targets {
            let status = match self.sync_target(target, version, build, write) {
                Ok(status) => status,
                Err(e) if target.required => {
                    return Err(ManifestError::RequiredTargetFailed {
                        path: target.path.clone(),
                        reason: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    warn!(path = %target.path.display(), error = %e, "skipping manifest");
                    TargetStatus::Failed(e.to_string())
                }
            };

            debug!(path = %target.path.display(), %status, "manifest processed");
            outcomes.push(TargetOutcome {
                path: target.path.clone(),
                format: target.format,
                status,
            });
        }

        let updated = outcomes.iter().filter(|o| o.is_updated()).count();
        info!(updated, total = outcomes.len(), dry_run = !write, "manifests synchronized");
        Ok(outcomes)
    }

    fn sync_target(
        &self,
        target: &ManifestTarget,
        version: &SemanticVersion,
        build: Option<BuildNumber>,
        write: bool,
    ) -> Result<TargetStatus> {
        if !target.path.exists() {
            return Ok(TargetStatus::Absent);
        }

        let adapter = self
            .registry
            .get(target.format)
            .ok_or_else(|| ManifestError::UnknownFormat(target.path.clone()))?;

        let content = fs::read_to_string(&target.path)?;
        let updated = adapter.apply(&target.path, &content, version, build)?;

        if updated == content {
            return Ok(TargetStatus::Unchanged);
        }

        if write {
            write_atomic(&target.path, updated.as_bytes()).map_err(|e| ManifestError::WriteFailed {
                path: target.path.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(TargetStatus::Updated)
    }

    /// Read the version fields of one manifest
    pub fn read_version(&self, path: &Path, format: ManifestFormat) -> Result<ManifestVersion> {
        let adapter = self
            .registry
            .get(format)
            .ok_or_else(|| ManifestError::UnknownFormat(path.to_path_buf()))?;
        let content = fs::read_to_string(path)?;
        adapter.read_version(path, &content)
    }

    /// Resolve the current version from the first source that exists and
    /// holds a parseable semantic version
    #[instrument(skip(self, sources), fields(sources = sources.len()))]
    pub fn resolve_current(&self, sources: &[PathBuf]) -> Result<ResolvedVersion> {
        for path in sources {
            if !path.exists() {
                debug!(path = %path.display(), "version source absent");
                continue;
            }

            let Some(format) = ManifestFormat::detect(path) else {
                debug!(path = %path.display(), "cannot infer manifest format");
                continue;
            };

            let read = match self.read_version(path, format) {
                Ok(read) => read,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "version source unreadable");
                    continue;
                }
            };

            match SemanticVersion::parse(&read.version) {
                Ok(version) => {
                    info!(path = %path.display(), %version, "resolved current version");
                    return Ok(ResolvedVersion {
                        path: path.clone(),
                        format,
                        version,
                        build_number: read.build_number,
                    });
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "version source not semver");
                }
            }
        }

        let names = sources
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(VersionError::CurrentVersionNotFound(names).into())
    }
}

impl Default for ManifestSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
