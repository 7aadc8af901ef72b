//! Recording version control double for tests

use std::cell::RefCell;
use std::path::PathBuf;

use launchpad_core::error::GitError;

use crate::repository::Result;
use crate::vcs::VersionControl;

/// One recorded version control call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    /// `commit_paths`
    Commit { paths: Vec<PathBuf>, message: String },
    /// `create_tag`
    Tag { name: String, message: String },
    /// `push`
    Push {
        remote: String,
        branch: String,
        tag: Option<String>,
    },
}

/// Version control that records calls instead of touching a repository
#[derive(Debug, Default)]
pub struct RecordingVersionControl {
    calls: RefCell<Vec<VcsCall>>,
    fail_push: bool,
}

impl RecordingVersionControl {
    /// Create a recorder where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `push` fail as if the remote rejected it
    pub fn failing_push() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_push: true,
        }
    }

    /// Calls recorded so far, in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }
}

impl VersionControl for RecordingVersionControl {
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<String> {
        self.calls.borrow_mut().push(VcsCall::Commit {
            paths: paths.to_vec(),
            message: message.to_string(),
        });
        Ok(format!("{:040x}", self.calls.borrow().len()))
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        self.calls.borrow_mut().push(VcsCall::Tag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str, tag: Option<&str>) -> Result<()> {
        self.calls.borrow_mut().push(VcsCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
            tag: tag.map(str::to_string),
        });
        if self.fail_push {
            return Err(GitError::PushFailed(format!("{} rejected the push", remote)));
        }
        Ok(())
    }
}
