//! Tag operations

use git2::Oid;
use tracing::{debug, info, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use launchpad_core::error::GitError;

impl GitRepo {
    /// Get all tags, parsing versions with the given tag format
    #[instrument(skip(self))]
    pub fn tags(&self, tag_format: &str) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::new(&name, commit.id().to_string(), tag_format));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag
                if let Ok(commit) = tag.target().and_then(|t| t.peel_to_commit()) {
                    let mut tag_info = TagInfo::new(&name, commit.id().to_string(), tag_format);
                    if let Some(msg) = tag.message() {
                        tag_info = tag_info.with_message(msg.trim_end());
                    }
                    tags.push(tag_info);
                }
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Find the release tag nearest to `until` (HEAD when omitted)
    ///
    /// Only tags on `until` or one of its ancestors count, so releases cut on
    /// other branches never bound the history. The tag with the fewest
    /// commits between it and `until` wins; ties go to the highest version.
    #[instrument(skip(self))]
    pub fn find_latest_version_tag(&self, tag_format: &str, until: Option<&str>) -> Result<Option<TagInfo>> {
        let tip = match until {
            Some(rev) => self.resolve_commit(rev)?,
            None => self.head_commit()?.id(),
        };

        let mut latest: Option<(usize, TagInfo)> = None;
        for tag in self.tags(tag_format)? {
            if tag.version.is_none() {
                continue;
            }
            let Ok(oid) = Oid::from_str(&tag.commit_hash) else {
                continue;
            };
            if oid != tip && !self.repo.graph_descendant_of(tip, oid)? {
                continue;
            }

            let (distance, _) = self.repo.graph_ahead_behind(tip, oid)?;
            let nearer = match &latest {
                None => true,
                Some((best, current)) => {
                    distance < *best || (distance == *best && tag.version > current.version)
                }
            };
            if nearer {
                latest = Some((distance, tag));
            }
        }

        let latest = latest.map(|(_, tag)| tag);
        debug!(latest = ?latest.as_ref().map(|t| &t.name), "found latest version tag");
        Ok(latest)
    }

    /// Check whether a tag exists
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Create a tag on HEAD; annotated when a message is given
    #[instrument(skip(self, message), fields(annotated = message.is_some()))]
    pub fn create_tag(&self, name: &str, message: Option<&str>) -> Result<String> {
        if self.tag_exists(name)? {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;

        if let Some(msg) = message {
            let sig = self.repo.signature()?;
            self.repo.tag(name, head.as_object(), &sig, msg, false)?;
        } else {
            self.repo.tag_lightweight(name, head.as_object(), false)?;
        }

        info!(name, annotated = message.is_some(), "created tag");
        Ok(head.id().to_string())
    }
}
