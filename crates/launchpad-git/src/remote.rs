//! Remote operations

use std::path::Path;
use std::process::{Command, Output};

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use launchpad_core::error::GitError;

impl GitRepo {
    /// Get list of remote names
    pub fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes
            .iter()
            .filter_map(|r| r.map(|s| s.to_string()))
            .collect())
    }

    /// Check if a remote exists
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        Ok(self.remotes()?.contains(&name.to_string()))
    }

    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Browsable https URL of a remote, used for changelog commit links
    pub fn remote_web_url(&self, name: &str) -> Result<Option<String>> {
        Ok(self.remote_url(name)?.as_deref().and_then(web_url))
    }
}

/// Turn a fetch URL (`git@host:owner/repo.git`, `https://host/owner/repo.git`)
/// into `https://host/owner/repo`
pub(crate) fn web_url(remote: &str) -> Option<String> {
    let trimmed = remote.trim_end_matches('/').trim_end_matches(".git");

    if let Some(rest) = trimmed.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        return Some(format!("https://{}/{}", host, path));
    }

    if let Some(rest) = trimmed.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map_or(rest, |(_, r)| r);
        let (host, path) = rest.split_once('/')?;
        let host = host.split(':').next().unwrap_or(host);
        return Some(format!("https://{}/{}", host, path));
    }

    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        return Some(trimmed.to_string());
    }

    None
}

/// Run `git push <remote> <refspecs..>` through the CLI, which picks up the
/// user's credential helpers and SSH agent
#[instrument(skip(dir), fields(dir = %dir.display()))]
pub(crate) fn push_refs(dir: &Path, remote: &str, refspecs: &[&str]) -> std::io::Result<Output> {
    let start = std::time::Instant::now();
    let output = Command::new("git")
        .current_dir(dir)
        .arg("push")
        .arg(remote)
        .args(refspecs)
        .output()?;
    info!(
        remote,
        refs = ?refspecs,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git push"
    );
    Ok(output)
}

/// Map a finished push to an error when git reported failure
pub(crate) fn check_push(output: std::io::Result<Output>, what: &str) -> Result<()> {
    let output = output.map_err(|e| GitError::PushFailed(format!("{}: {}", what, e)))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(GitError::PushFailed(format!("{}: {}", what, stderr.trim())))
}
