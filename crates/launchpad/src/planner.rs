//! Release planning and execution
//!
//! A release runs as a fixed sequence of stages. Each stage either succeeds
//! or fails the whole run with an error naming the stage; nothing is rolled
//! back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug_span, info, instrument};

use launchpad_core::config::Config;
use launchpad_core::error::{GitError, LaunchpadError, Result};
use launchpad_core::workflow::{format_tag, render_message};
use launchpad_git::VersionControl;
use launchpad_manifests::{ManifestSynchronizer, ManifestTarget, ResolvedVersion, TargetOutcome};
use launchpad_strategies::{BuildNumber, BumpDirective, SemanticVersion};

/// Stage names reported in errors
pub mod stage {
    /// Reading the current version from the source manifests
    pub const RESOLVE_VERSION: &str = "resolve-version";
    /// Applying the bump directive
    pub const COMPUTE_VERSION: &str = "compute-version";
    /// Deriving the build number
    pub const RESOLVE_BUILD: &str = "resolve-build";
    /// Writing manifests
    pub const SYNC_MANIFESTS: &str = "sync-manifests";
    /// Committing touched manifests
    pub const COMMIT: &str = "commit";
    /// Tagging the release
    pub const TAG: &str = "tag";
    /// Pushing to the remote
    pub const PUSH: &str = "push";
}

/// What to release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// How the version changes
    pub directive: BumpDirective,
    /// Explicit build number, overriding the configured strategy
    pub build: Option<BuildNumber>,
}

impl ReleaseRequest {
    /// Create a request with a derived build number
    pub fn new(directive: BumpDirective) -> Self {
        Self {
            directive,
            build: None,
        }
    }

    /// Use an explicit build number
    pub fn with_build(mut self, build: impl Into<BuildNumber>) -> Self {
        self.build = Some(build.into());
        self
    }
}

/// Result of planning or executing a release
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
    /// Manifest the current version was read from
    pub source: PathBuf,
    /// Version before the release
    pub previous_version: SemanticVersion,
    /// Version after the release
    pub version: SemanticVersion,
    /// Build number written with the version
    pub build_number: BuildNumber,
    /// Per-target results, in configured order
    pub outcomes: Vec<TargetOutcome>,
    /// Hash of the release commit, if one was made
    pub commit: Option<String>,
    /// Tag name, if one was created
    pub tag: Option<String>,
    /// Whether the release was pushed
    pub pushed: bool,
}

impl ReleasePlan {
    /// Paths whose content changed
    pub fn touched_paths(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter(|o| o.is_updated())
            .map(|o| o.path.clone())
            .collect()
    }
}

/// Computes and applies the next release version
pub struct ReleasePlanner<'a> {
    config: &'a Config,
    root: PathBuf,
    synchronizer: ManifestSynchronizer,
    now: Option<DateTime<Utc>>,
}

fn at_stage<T>(result: Result<T>, name: &str) -> Result<T> {
    result.map_err(|e| e.at_stage(name))
}

impl<'a> ReleasePlanner<'a> {
    /// Create a planner for a project rooted at `root`
    pub fn new(config: &'a Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            synchronizer: ManifestSynchronizer::new(),
            now: None,
        }
    }

    /// Pin the clock used for timestamp build numbers
    pub fn with_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Project root the configured paths are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the current version from the configured sources
    pub fn current(&self) -> Result<ResolvedVersion> {
        let sources = self.config.manifests.source_paths(&self.root);
        at_stage(
            self.synchronizer.resolve_current(&sources),
            stage::RESOLVE_VERSION,
        )
    }

    fn targets(&self) -> Result<Vec<ManifestTarget>> {
        self.config
            .manifests
            .enabled_targets()
            .map(|t| ManifestTarget::from_config(&self.root, t))
            .collect()
    }

    fn compute(&self, request: &ReleaseRequest) -> Result<(ResolvedVersion, SemanticVersion, BuildNumber)> {
        let current = self.current()?;

        let version = at_stage(
            current.version.apply(&request.directive),
            stage::COMPUTE_VERSION,
        )?;

        let build = {
            let _stage = debug_span!("stage", name = stage::RESOLVE_BUILD).entered();
            match request.build {
                Some(build) => build,
                None => BuildNumber::resolve(
                    self.config.versioning.build_strategy,
                    current.build_number,
                    self.now.unwrap_or_else(Utc::now),
                ),
            }
        };

        info!(
            previous = %current.version,
            %version,
            build = build.value(),
            directive = %request.directive,
            "computed release version"
        );
        Ok((current, version, build))
    }

    fn require_vcs<'v>(
        &self,
        vcs: Option<&'v dyn VersionControl>,
        name: &str,
    ) -> Result<&'v dyn VersionControl> {
        vcs.ok_or_else(|| LaunchpadError::from(GitError::NotARepository(self.root.clone())).at_stage(name))
    }

    /// Compute the release without touching any file or the repository
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn plan(&self, request: &ReleaseRequest) -> Result<ReleasePlan> {
        let (current, version, build) = self.compute(request)?;

        let outcomes = at_stage(
            self.targets()
                .and_then(|targets| self.synchronizer.preview(&targets, &version, Some(build))),
            stage::SYNC_MANIFESTS,
        )?;

        let tag = self
            .config
            .git
            .tag
            .then(|| format_tag(self.config, &version.to_string()));

        Ok(ReleasePlan {
            source: current.path,
            previous_version: current.version,
            version,
            build_number: build,
            outcomes,
            commit: None,
            tag,
            pushed: false,
        })
    }

    /// Run the full release: write manifests, then commit, tag and push as
    /// configured
    ///
    /// `vcs` may be `None` only when the configuration disables every git
    /// step.
    #[instrument(skip(self, vcs), fields(root = %self.root.display()))]
    pub fn execute(
        &self,
        request: &ReleaseRequest,
        vcs: Option<&dyn VersionControl>,
    ) -> Result<ReleasePlan> {
        let (current, version, build) = self.compute(request)?;
        let git = &self.config.git;
        let version_str = version.to_string();

        let outcomes = at_stage(
            self.targets()
                .and_then(|targets| self.synchronizer.apply(&targets, &version, Some(build))),
            stage::SYNC_MANIFESTS,
        )?;

        let mut plan = ReleasePlan {
            source: current.path,
            previous_version: current.version,
            version,
            build_number: build,
            outcomes,
            commit: None,
            tag: None,
            pushed: false,
        };

        let touched = plan.touched_paths();
        if git.commit && !touched.is_empty() {
            let message = render_message(&git.commit_message, &version_str, Some(build.value()));
            let hash = at_stage(
                self.require_vcs(vcs, stage::COMMIT)?.commit_paths(&touched, &message).map_err(Into::into),
                stage::COMMIT,
            )?;
            info!(commit = %hash, files = touched.len(), "committed release");
            plan.commit = Some(hash);
        } else if git.commit {
            info!("no manifest changed, skipping commit");
        }

        if git.tag {
            let name = format_tag(self.config, &version_str);
            let message = render_message(&git.tag_message, &version_str, Some(build.value()));
            at_stage(
                self.require_vcs(vcs, stage::TAG)?.create_tag(&name, &message).map_err(Into::into),
                stage::TAG,
            )?;
            info!(tag = %name, "tagged release");
            plan.tag = Some(name);
        }

        if git.push {
            at_stage(
                self.require_vcs(vcs, stage::PUSH)?
                    .push(&git.remote, &git.branch, plan.tag.as_deref())
                    .map_err(Into::into),
                stage::PUSH,
            )?;
            info!(remote = %git.remote, branch = %git.branch, "pushed release");
            plan.pushed = true;
        }

        Ok(plan)
    }
}
