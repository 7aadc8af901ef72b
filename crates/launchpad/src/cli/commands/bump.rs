//! Bump command

use clap::{ArgGroup, Args};
use console::style;
use dialoguer::Confirm;
use tracing::{info, warn};

use launchpad_core::config::Config;
use launchpad_core::error::{LaunchpadError, WorkflowError};
use launchpad_git::{GitRepo, VersionControl};
use launchpad_strategies::BumpDirective;
use launchpad::{ReleasePlan, ReleasePlanner, ReleaseRequest};

use crate::cli::output::{self, header, key_value, outcome_line, tag_style, version_style};
use crate::cli::{Cli, OutputFormat, Project};

/// Bump the version in every configured manifest
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("bump")
        .required(true)
        .args(["major", "minor", "patch", "set_version"])
))]
pub struct BumpCommand {
    /// Increment the major version
    #[arg(long)]
    pub major: bool,

    /// Increment the minor version
    #[arg(long)]
    pub minor: bool,

    /// Increment the patch version
    #[arg(long)]
    pub patch: bool,

    /// Set an explicit version
    #[arg(long = "version", value_name = "VERSION")]
    pub set_version: Option<String>,

    /// Explicit build number
    #[arg(long, value_name = "N")]
    pub build: Option<u64>,

    /// Create an annotated tag
    #[arg(long)]
    pub tag: bool,

    /// Push the commit and tag
    #[arg(long)]
    pub push: bool,

    /// Do not commit touched manifests
    #[arg(long)]
    pub no_commit: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl BumpCommand {
    fn directive(&self) -> BumpDirective {
        if self.major {
            BumpDirective::Major
        } else if self.minor {
            BumpDirective::Minor
        } else if self.patch {
            BumpDirective::Patch
        } else {
            BumpDirective::Explicit(self.set_version.clone().unwrap_or_default())
        }
    }

    fn request(&self) -> ReleaseRequest {
        let request = ReleaseRequest::new(self.directive());
        match self.build {
            Some(build) => request.with_build(build),
            None => request,
        }
    }

    /// Flags layered over the loaded configuration
    fn effective_config(&self, config: &Config) -> Config {
        let mut config = config.clone();
        config.git.tag |= self.tag;
        config.git.push |= self.push;
        if self.no_commit {
            config.git.commit = false;
        }
        config
    }

    /// Execute the bump command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            directive = %self.directive(),
            build = ?self.build,
            tag = self.tag,
            push = self.push,
            no_commit = self.no_commit,
            dry_run = self.dry_run,
            "executing bump command"
        );
        let cwd = std::env::current_dir()?;
        let project = Project::load(&cwd)?;

        if project.config_path.is_none() && cli.chatty() {
            output::warning(&format!(
                "No configuration found, using defaults. Run {} to create one.",
                style("launchpad init").cyan()
            ));
        }

        let config = self.effective_config(&project.config);
        let planner = ReleasePlanner::new(&config, &project.root);
        let request = self.request();

        let preview = planner.plan(&request)?;
        if cli.chatty() {
            self.print_preview(&preview);
        }

        if self.dry_run {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            }
            return Ok(());
        }

        let uses_git = config.git.commit || config.git.tag || config.git.push;
        let repo = if uses_git {
            let repo = GitRepo::discover(&project.root)?;
            self.check_repository(&repo, &config, cli)?;
            Some(repo)
        } else {
            None
        };

        if !self.yes && cli.format == OutputFormat::Text {
            let confirmed = Confirm::new()
                .with_prompt("Proceed with version bump?")
                .default(true)
                .interact()?;

            if !confirmed {
                return Err(LaunchpadError::from(WorkflowError::Cancelled).into());
            }
        }

        let vcs = repo.as_ref().map(|r| r as &dyn VersionControl);
        let plan = planner.execute(&request, vcs)?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
            OutputFormat::Text => self.print_result(&plan, cli),
        }

        Ok(())
    }

    fn check_repository(&self, repo: &GitRepo, config: &Config, cli: &Cli) -> anyhow::Result<()> {
        let state = repo.tree_state()?;

        if !state.is_clean() {
            warn!(pending = state.pending.len(), "working tree has uncommitted changes");
            if !cli.quiet {
                output::warning(&format!(
                    "{} uncommitted change(s) in the working tree; only touched manifests are committed.",
                    state.pending.len()
                ));
            }
        }

        if let Some(branch) = state.branch.as_deref().filter(|_| !state.on_branch(&config.git.branch)) {
            warn!(current = %branch, expected = %config.git.branch, "not on release branch");
            if !cli.quiet {
                output::warning(&format!(
                    "On branch '{}', configured release branch is '{}'.",
                    branch, config.git.branch
                ));
            }
        }

        Ok(())
    }

    fn print_preview(&self, plan: &ReleasePlan) {
        println!("{}", header("Version Bump"));
        println!();
        println!("{}", key_value("Source", &plan.source.display().to_string()));
        println!("{}", key_value("Current version", &plan.previous_version.to_string()));
        println!(
            "{}",
            key_value(
                "Next version",
                &version_style().apply_to(&plan.version).to_string()
            )
        );
        println!("{}", key_value("Build number", &plan.build_number.to_string()));
        if let Some(tag) = &plan.tag {
            println!("{}", key_value("Tag", &tag_style().apply_to(tag).to_string()));
        }
        println!();
        for outcome in &plan.outcomes {
            println!("{}", outcome_line(outcome));
        }
        println!();

        if self.dry_run {
            println!("  {}", style("[DRY RUN - no changes will be made]").yellow().bold());
        }
    }

    fn print_result(&self, plan: &ReleasePlan, cli: &Cli) {
        if cli.quiet {
            println!("{}+{}", plan.version, plan.build_number);
            return;
        }

        let updated = plan.touched_paths().len();
        output::success(&format!(
            "Bumped {} → {} ({} manifest{} updated)",
            plan.previous_version,
            version_style().apply_to(&plan.version),
            updated,
            if updated == 1 { "" } else { "s" }
        ));
        if let Some(commit) = &plan.commit {
            output::info(&format!("Committed {}", &commit[..commit.len().min(7)]));
        }
        if let Some(tag) = &plan.tag {
            output::info(&format!("Tagged {}", tag_style().apply_to(tag)));
        }
        if plan.pushed {
            output::info("Pushed to remote");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        bump: BumpCommand,
    }

    fn parse(args: &[&str]) -> Result<BumpCommand, clap::Error> {
        let mut argv = vec!["bump"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).map(|h| h.bump)
    }

    #[test]
    fn test_directive_flags() {
        assert_eq!(parse(&["--minor"]).unwrap().directive(), BumpDirective::Minor);
        assert_eq!(
            parse(&["--version", "2.0.0-rc.1"]).unwrap().directive(),
            BumpDirective::Explicit("2.0.0-rc.1".to_string())
        );
    }

    #[test]
    fn test_directive_is_required_and_exclusive() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--major", "--patch"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cmd = parse(&["--patch", "--tag", "--no-commit", "--build", "12"]).unwrap();
        let config = cmd.effective_config(&Config::default());

        assert!(config.git.tag);
        assert!(!config.git.commit);
        assert!(!config.git.push);
        assert_eq!(cmd.request().build.map(|b| b.value()), Some(12));
    }
}
