//! Version control seam used by the release planner
//!
//! The planner only needs to commit touched manifests, tag the release and
//! push. Depending on this trait rather than [`GitRepo`] keeps the release
//! pipeline testable without a real repository or remote.

use std::path::PathBuf;

use crate::remote::{check_push, push_refs};
use crate::repository::{GitRepo, Result};
use launchpad_core::error::GitError;

/// Side-effecting git operations performed during a release
pub trait VersionControl {
    /// Stage and commit the given files, returning the commit hash
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<String>;

    /// Create an annotated tag on HEAD
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push the branch, and the tag when one was created
    fn push(&self, remote: &str, branch: &str, tag: Option<&str>) -> Result<()>;
}

impl VersionControl for GitRepo {
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<String> {
        GitRepo::commit_paths(self, paths, message)
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        GitRepo::create_tag(self, name, Some(message)).map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str, tag: Option<&str>) -> Result<()> {
        if !self.has_remote(remote)? {
            return Err(GitError::RemoteNotFound(remote.to_string()));
        }
        let dir = self.workdir().ok_or(GitError::NoWorkdir)?;

        // Explicit tag refspec: --follow-tags misses tags on already pushed commits
        let refspecs: Vec<&str> = std::iter::once(branch).chain(tag).collect();
        check_push(push_refs(dir, remote, &refspecs), &format!("push {}", refspecs.join(" ")))
    }
}
