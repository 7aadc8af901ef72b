//! Launchpad - Release versioning for multi-platform mobile projects
//!
//! The [`ReleasePlanner`] resolves the current version from the project's
//! manifests, computes the next version and build number, writes them to
//! every configured manifest and records the release in git.

pub mod planner;

pub use planner::{ReleasePlan, ReleasePlanner, ReleaseRequest};
