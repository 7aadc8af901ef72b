//! Manifest adapter traits

use std::path::Path;

use launchpad_core::error::{ManifestError, Result};
use launchpad_core::ManifestFormat;
use launchpad_strategies::{BuildNumber, SemanticVersion};
use serde::Serialize;

/// Version fields read from a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestVersion {
    /// Version string as written in the file
    pub version: String,
    /// Build number, when the format carries one and it is numeric
    pub build_number: Option<BuildNumber>,
}

/// Trait for platform manifest adapters
///
/// Adapters work on file content rather than paths so that the
/// synchronizer owns all I/O. The path is only used for error context.
pub trait ManifestAdapter: Send + Sync {
    /// The format this adapter handles
    fn format(&self) -> ManifestFormat;

    /// Get the adapter name (e.g., "pubspec", "gradle")
    fn name(&self) -> &'static str {
        self.format().as_str()
    }

    /// Check that the content is well-formed for this format
    fn validate(&self, path: &Path, content: &str) -> Result<()>;

    /// Read the current version fields
    fn read_version(&self, path: &Path, content: &str) -> Result<ManifestVersion>;

    /// Return the content with the version fields replaced
    ///
    /// Applying the same version twice must return identical text.
    fn apply(
        &self,
        path: &Path,
        content: &str,
        version: &SemanticVersion,
        build: Option<BuildNumber>,
    ) -> Result<String>;
}

/// Build a parse failure for a manifest
pub(crate) fn parse_failed(path: &Path, format: ManifestFormat, reason: impl ToString) -> ManifestError {
    ManifestError::ParseFailed {
        path: path.to_path_buf(),
        format: format.to_string(),
        reason: reason.to_string(),
    }
}

/// Build a missing-field failure for a manifest
pub(crate) fn field_not_found(path: &Path, field: &str) -> ManifestError {
    ManifestError::FieldNotFound {
        path: path.to_path_buf(),
        field: field.to_string(),
    }
}
