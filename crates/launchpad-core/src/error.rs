//! Error types for Launchpad

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LaunchpadError
pub type Result<T> = std::result::Result<T, LaunchpadError>;

/// Main error type for Launchpad operations
#[derive(Debug, Error)]
pub enum LaunchpadError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Manifest-related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Workflow-related errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Bare repositories have no working tree to commit from
    #[error("Repository has no working directory")]
    NoWorkdir,

    /// A path to stage lies outside the working tree
    #[error("Path is outside the repository working directory: {0}")]
    PathOutsideRepository(PathBuf),

    /// Revision could not be resolved
    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// Failed to create commit
    #[error("Failed to create commit: {0}")]
    CommitFailed(String),

    /// Failed to push
    #[error("Failed to push to remote: {0}")]
    PushFailed(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Failed to parse version
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, String),

    /// Failed to parse a build number
    #[error("Invalid build number '{0}'")]
    InvalidBuildNumber(String),

    /// No configured source yielded a current version
    #[error("Could not resolve the current version from any of: {0}")]
    CurrentVersionNotFound(String),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Failed to write changelog
    #[error("Failed to write changelog {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Manifest-related errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The file content is not valid for its declared format
    #[error("Failed to parse {format} manifest {path}: {reason}")]
    ParseFailed {
        path: PathBuf,
        format: String,
        reason: String,
    },

    /// A recognized version field was not present
    #[error("No {field} field found in {path}")]
    FieldNotFound { path: PathBuf, field: String },

    /// A value does not fit the field the format stores it in
    #[error("{field} {value} in {path} exceeds the maximum of {max}")]
    ValueOutOfRange {
        path: PathBuf,
        field: String,
        value: u64,
        max: u64,
    },

    /// Could not infer a manifest format from a file name
    #[error("Cannot determine manifest format for {0}")]
    UnknownFormat(PathBuf),

    /// Failed to write the updated manifest
    #[error("Failed to write manifest {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// A required target failed; the remaining targets were not attempted
    #[error("Required manifest {path} could not be updated: {reason}")]
    RequiredTargetFailed { path: PathBuf, reason: String },
}

/// Workflow-related errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A pipeline stage failed
    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: String,
        #[source]
        source: Box<LaunchpadError>,
    },

    /// User cancelled
    #[error("Operation cancelled by user")]
    Cancelled,
}

impl LaunchpadError {
    /// Wrap this error with the name of the pipeline stage that produced it
    pub fn at_stage(self, stage: impl Into<String>) -> Self {
        WorkflowError::StageFailed {
            stage: stage.into(),
            source: Box::new(self),
        }
        .into()
    }

    /// The innermost error, looking through stage wrappers
    pub fn root(&self) -> &LaunchpadError {
        match self {
            Self::Workflow(WorkflowError::StageFailed { source, .. }) => source.root(),
            other => other,
        }
    }
}
