//! Working tree state checked before a release rewrites manifests

use std::path::PathBuf;

use git2::{Status, StatusOptions};

use crate::repository::{GitRepo, Result};

/// Index and working tree flags that count as pending work
const PENDING: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE)
    .union(Status::WT_NEW)
    .union(Status::WT_MODIFIED)
    .union(Status::WT_DELETED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE);

/// Snapshot of the repository state relevant to a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    /// Checked-out branch, `None` when detached or unborn
    pub branch: Option<String>,
    /// Workdir-relative paths with uncommitted changes
    pub pending: Vec<PathBuf>,
}

impl TreeState {
    pub fn is_clean(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether HEAD is on `expected`; detached heads never match
    pub fn on_branch(&self, expected: &str) -> bool {
        self.branch.as_deref() == Some(expected)
    }
}

impl GitRepo {
    /// Paths with staged or unstaged changes, ignored files excluded
    pub fn pending_paths(&self) -> Result<Vec<PathBuf>> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses
            .iter()
            .filter(|entry| entry.status().intersects(PENDING))
            .filter_map(|entry| entry.path().map(PathBuf::from))
            .collect())
    }

    /// Whether there is nothing to commit
    pub fn is_clean(&self) -> Result<bool> {
        Ok(self.pending_paths()?.is_empty())
    }

    /// Name of the checked-out branch
    pub fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Branch and pending changes in one read
    pub fn tree_state(&self) -> Result<TreeState> {
        Ok(TreeState {
            branch: self.current_branch()?,
            pending: self.pending_paths()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn committed_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        std::fs::write(temp.path().join("pubspec.yaml"), "version: 1.0.0+1\n").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("pubspec.yaml")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Release Bot", "release@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "chore: init", &tree, &[])
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_fresh_commit_is_clean() {
        let (_temp, repo) = committed_repo();
        let state = repo.tree_state().unwrap();
        assert!(state.is_clean());
        assert!(state.branch.is_some());
    }

    #[test]
    fn test_modified_and_untracked_are_pending() {
        let (temp, repo) = committed_repo();
        std::fs::write(temp.path().join("pubspec.yaml"), "version: 1.0.1+2\n").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "draft").unwrap();

        let mut pending = repo.pending_paths().unwrap();
        pending.sort();
        assert_eq!(
            pending,
            vec![PathBuf::from("notes.txt"), PathBuf::from("pubspec.yaml")]
        );
        assert!(!repo.is_clean().unwrap());
    }

    #[test]
    fn test_ignored_files_are_not_pending() {
        let (temp, repo) = committed_repo();
        std::fs::write(temp.path().join(".git/info/exclude"), "build/\n").unwrap();
        std::fs::create_dir(temp.path().join("build")).unwrap();
        std::fs::write(temp.path().join("build/app.apk"), "bin").unwrap();
        assert!(repo.is_clean().unwrap());
    }

    #[test]
    fn test_unborn_head_has_no_branch() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.current_branch().unwrap(), None);
    }

    #[test]
    fn test_on_branch() {
        let state = TreeState {
            branch: Some("main".to_string()),
            pending: Vec::new(),
        };
        assert!(state.on_branch("main"));
        assert!(!state.on_branch("release"));
        assert!(!TreeState::default().on_branch("main"));
    }
}
