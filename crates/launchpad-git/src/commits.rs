//! Commit history operations

use std::path::Path;

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, info, instrument};

use launchpad_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Commits reachable from `until` but not from `since`, newest first
    ///
    /// Mirrors `git log since..until`: `since` is excluded, `until` is
    /// included. A missing `since` walks the whole history and a missing
    /// `until` means HEAD.
    #[instrument(skip(self))]
    pub fn commits_in_range(&self, since: Option<&str>, until: Option<&str>) -> Result<Vec<CommitInfo>> {
        let until_oid = match until {
            Some(rev) => self.resolve_commit(rev)?,
            None => self.head_commit()?.id(),
        };
        let since_oid = since.map(|rev| self.resolve_commit(rev)).transpose()?;

        let commits = self.walk(until_oid, since_oid)?;
        debug!(count = commits.len(), "collected commits in range");
        Ok(commits)
    }

    /// Commits since the nearest release tag behind `until`, or the full
    /// history when no release tag is reachable from it
    #[instrument(skip(self))]
    pub fn commits_since_release(&self, tag_format: &str, until: Option<&str>) -> Result<Vec<CommitInfo>> {
        let latest = self.find_latest_version_tag(tag_format, until)?;
        let since = latest.as_ref().map(|t| t.commit_hash.as_str());
        debug!(since = ?since, "resolved release range start");
        self.commits_in_range(since, until)
    }

    /// Stage the given files and commit them on HEAD, returning the new hash
    ///
    /// Only the listed paths are staged; anything else already in the index
    /// is committed as well, matching `git commit <paths>` semantics for a
    /// clean index.
    #[instrument(skip(self, paths), fields(files = paths.len()))]
    pub fn commit_paths<P: AsRef<Path>>(&self, paths: &[P], message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        for path in paths {
            let relative = self.workdir_relative(path.as_ref())?;
            index.add_path(&relative)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self
            .repo
            .signature()
            .map_err(|e| GitError::CommitFailed(format!("no committer identity: {}", e.message())))?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| GitError::CommitFailed(e.message().to_string()))?;

        info!(hash = %oid, "created commit");
        Ok(oid.to_string())
    }

    fn walk(&self, from: Oid, hide: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(from)?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();

    let message = commit.summary().unwrap_or("(no message)").to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(
        commit.id().to_string(),
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
    .with_parent_count(commit.parent_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    fn commit_file(repo: &Repository, dir: &Path, name: &str, message: &str) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        std::fs::write(dir.join(name), message).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn setup_repo_with_commits() -> (TempDir, GitRepo, Vec<Oid>) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }

        let oids = vec![
            commit_file(&repo, temp.path(), "a.txt", "chore: initial commit"),
            commit_file(&repo, temp.path(), "b.txt", "feat(auth): add login"),
            commit_file(&repo, temp.path(), "c.txt", "fix: handle empty input"),
        ];

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo, oids)
    }

    #[test]
    fn test_full_history_newest_first() {
        let (_temp, repo, _) = setup_repo_with_commits();
        let commits = repo.commits_in_range(None, None).unwrap();
        let subjects: Vec<_> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(
            subjects,
            vec!["fix: handle empty input", "feat(auth): add login", "chore: initial commit"]
        );
    }

    #[test]
    fn test_range_excludes_since_includes_until() {
        let (_temp, repo, oids) = setup_repo_with_commits();
        let since = oids[0].to_string();
        let until = oids[1].to_string();

        let commits = repo.commits_in_range(Some(&since), Some(&until)).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "feat(auth): add login");
    }

    #[test]
    fn test_empty_range() {
        let (_temp, repo, _) = setup_repo_with_commits();
        let commits = repo.commits_in_range(Some("HEAD"), None).unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn test_unknown_revision() {
        let (_temp, repo, _) = setup_repo_with_commits();
        let result = repo.commits_in_range(Some("v9.9.9"), None);
        assert!(matches!(result, Err(GitError::UnknownRevision(_))));
    }

    #[test]
    fn test_commits_since_release() {
        let (_temp, repo, oids) = setup_repo_with_commits();
        assert_eq!(repo.commits_since_release("v{version}", None).unwrap().len(), 3);

        let commit = repo.inner().find_commit(oids[1]).unwrap();
        repo.inner()
            .tag_lightweight("v1.0.0", commit.as_object(), false)
            .unwrap();

        let commits = repo.commits_since_release("v{version}", None).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "fix: handle empty input");
    }

    #[test]
    fn test_release_tag_on_side_branch_is_ignored() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let a = commit_file(&repo, temp.path(), "a.txt", "chore: a");
        let b = commit_file(&repo, temp.path(), "b.txt", "feat: b");
        commit_file(&repo, temp.path(), "c.txt", "fix: c");

        let sig = Signature::now("Test", "test@example.com").unwrap();
        let base = repo.find_commit(a).unwrap();
        let side = repo
            .commit(None, &sig, &sig, "feat: side", &base.tree().unwrap(), &[&base])
            .unwrap();

        repo.tag_lightweight("v1.0.0", repo.find_commit(b).unwrap().as_object(), false)
            .unwrap();
        repo.tag_lightweight("v2.0.0", repo.find_commit(side).unwrap().as_object(), false)
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        let commits = git_repo.commits_since_release("v{version}", None).unwrap();
        let subjects: Vec<_> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(subjects, vec!["fix: c"]);
    }

    #[test]
    fn test_commit_paths() {
        let (temp, repo, _) = setup_repo_with_commits();
        std::fs::write(temp.path().join("pubspec.yaml"), "version: 1.0.0+1\n").unwrap();

        let hash = repo
            .commit_paths(&[temp.path().join("pubspec.yaml")], "chore(release): 1.0.0")
            .unwrap();

        let head = repo.head_commit().unwrap();
        assert_eq!(head.id().to_string(), hash);
        assert_eq!(head.summary(), Some("chore(release): 1.0.0"));
        assert!(head.tree().unwrap().get_name("pubspec.yaml").is_some());
        assert!(repo.is_clean().unwrap());
    }
}
