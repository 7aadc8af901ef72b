//! Exit codes for the CLI

use launchpad_core::error::{ConfigError, GitError, LaunchpadError, ManifestError, VersionError, WorkflowError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version or parse error
pub const VERSION_ERROR: i32 = 4;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Manifest error
pub const MANIFEST_ERROR: i32 = 6;

/// User cancelled
pub const CANCELLED: i32 = 130;

fn for_launchpad_error(err: &LaunchpadError) -> i32 {
    match err.root() {
        LaunchpadError::Config(ConfigError::InvalidValue { .. }) => VALIDATION_ERROR,
        LaunchpadError::Config(_) => CONFIG_ERROR,
        LaunchpadError::Git(_) => GIT_ERROR,
        LaunchpadError::Version(_) => VERSION_ERROR,
        LaunchpadError::Manifest(_) => MANIFEST_ERROR,
        LaunchpadError::Workflow(WorkflowError::Cancelled) => CANCELLED,
        _ => ERROR,
    }
}

/// Map an error returned by a command to the process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<LaunchpadError>() {
        return for_launchpad_error(err);
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    if err.downcast_ref::<VersionError>().is_some() {
        return VERSION_ERROR;
    }
    if err.downcast_ref::<ManifestError>().is_some() {
        return MANIFEST_ERROR;
    }
    ERROR
}
