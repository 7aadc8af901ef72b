//! Checks run on a loaded configuration before any command uses it

use tracing::debug;

use crate::error::{ConfigError, LaunchpadError, Result};
use crate::types::ManifestFormat;

use super::types::Config;

fn invalid(field: impl Into<String>, message: impl Into<String>) -> LaunchpadError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
    .into()
}

/// Reject configurations a release could not run with
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_templates(config)?;
    validate_git(config)?;
    validate_changelog(config)?;
    validate_manifests(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_templates(config: &Config) -> Result<()> {
    let templates = [
        ("versioning.tag_format", &config.versioning.tag_format),
        ("git.commit_message", &config.git.commit_message),
    ];
    match templates.iter().find(|(_, t)| !t.contains("{version}")) {
        Some((field, _)) => Err(invalid(*field, "must contain {version} placeholder")),
        None => Ok(()),
    }
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.trim().is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty"));
    }
    if config.git.branch.trim().is_empty() {
        return Err(invalid("git.branch", "branch cannot be empty"));
    }
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    match &config.changelog.repo_url {
        Some(repo_url) => url::Url::parse(repo_url)
            .map(drop)
            .map_err(|e| invalid("changelog.repo_url", e.to_string())),
        None => Ok(()),
    }
}

fn validate_manifests(config: &Config) -> Result<()> {
    debug!(
        targets = config.manifests.targets.len(),
        sources = config.manifests.sources.len(),
        "validating manifest entries"
    );

    for (i, target) in config.manifests.targets.iter().enumerate() {
        if target.path.as_os_str().is_empty() {
            return Err(invalid(format!("manifests.targets[{i}].path"), "path cannot be empty"));
        }
        if target.resolved_format().is_none() {
            return Err(invalid(
                format!("manifests.targets[{i}].format"),
                format!(
                    "cannot infer a format from {}; set one of: package-json, pubspec, info-plist, gradle",
                    target.path.display()
                ),
            ));
        }
    }

    match config
        .manifests
        .sources
        .iter()
        .position(|source| ManifestFormat::detect(source).is_none())
    {
        Some(i) => Err(invalid(
            format!("manifests.sources[{i}]"),
            format!(
                "cannot infer a format from {}",
                config.manifests.sources[i].display()
            ),
        )),
        None => Ok(()),
    }
}
