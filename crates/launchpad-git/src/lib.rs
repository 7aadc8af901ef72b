//! Launchpad Git - Git operations for release management
//!
//! This crate provides the commit history feed for changelogs, version tag
//! lookup, and the [`VersionControl`] seam the release planner commits, tags
//! and pushes through.

mod commits;
pub mod mock;
mod remote;
mod repository;
mod status;
mod tags;
pub mod types;
mod vcs;

pub use mock::{RecordingVersionControl, VcsCall};
pub use repository::{GitRepo, Result};
pub use status::TreeState;
pub use types::{CommitInfo, TagInfo};
pub use vcs::VersionControl;
