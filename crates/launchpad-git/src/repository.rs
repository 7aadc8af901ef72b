//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use launchpad_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Handle on the repository a project lives in
pub struct GitRepo {
    pub(crate) repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    fn wrap(repo: Repository) -> Self {
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Self { repo, root }
    }

    /// Open the repository rooted exactly at `path`
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!("opening git repository");
        Repository::open(path)
            .map(Self::wrap)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => GitError::RepositoryNotFound(path.to_path_buf()),
                _ => GitError::OpenFailed(e.to_string()),
            })
    }

    /// Find the repository containing `start`, walking up through parents
    #[instrument(fields(start = %start.display()))]
    pub fn discover(start: &Path) -> Result<Self> {
        info!("discovering git repository");
        Repository::discover(start)
            .map(Self::wrap)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => GitError::NotARepository(start.to_path_buf()),
                _ => GitError::OpenFailed(e.to_string()),
            })
    }

    /// Working tree root, or the git dir for bare repositories
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Underlying git2 handle
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Commit HEAD points at
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }

    /// Resolve a revision (hash, tag, branch, `HEAD~2`) to a commit id
    pub fn resolve_commit(&self, rev: &str) -> Result<git2::Oid> {
        let object = self
            .repo
            .revparse_single(rev)
            .map_err(|_| GitError::UnknownRevision(rev.to_string()))?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| GitError::UnknownRevision(rev.to_string()))?;
        Ok(commit.id())
    }

    /// Express a path relative to the working tree, as the index expects
    pub(crate) fn workdir_relative(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self.workdir().ok_or(GitError::NoWorkdir)?;
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        if let Ok(relative) = path.strip_prefix(workdir) {
            return Ok(relative.to_path_buf());
        }

        // Symlinked temp dirs (macOS /var -> /private/var) need canonical forms
        let outside = || GitError::PathOutsideRepository(path.to_path_buf());
        let canonical_workdir = workdir.canonicalize().map_err(|_| outside())?;
        let canonical_path = path.canonicalize().map_err(|_| outside())?;
        canonical_path
            .strip_prefix(&canonical_workdir)
            .map(Path::to_path_buf)
            .map_err(|_| outside())
    }
}
