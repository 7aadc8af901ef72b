//! Version command

use clap::Args;
use tracing::info;

use launchpad::{ReleasePlanner, ReleaseRequest};
use launchpad_strategies::BumpDirective;

use crate::cli::output::{header, key_value, path_style, version_style};
use crate::cli::{Cli, OutputFormat, Project};

/// Show the current version and build number
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Also show the version a bump would produce (major, minor, patch or
    /// an explicit version)
    #[arg(long, value_name = "BUMP")]
    pub next: Option<BumpDirective>,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(next = ?self.next, "executing version command");
        let cwd = std::env::current_dir()?;
        let project = Project::load(&cwd)?;
        let planner = ReleasePlanner::new(&project.config, &project.root);

        let current = planner.current()?;
        let next = match &self.next {
            Some(directive) => Some(planner.plan(&ReleaseRequest::new(directive.clone()))?),
            None => None,
        };

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "source": current.path,
                    "format": current.format,
                    "current": current.version,
                    "build": current.build_number,
                    "next": next.as_ref().map(|p| p.version.to_string()),
                    "next_build": next.as_ref().map(|p| p.build_number),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text if cli.quiet => match &next {
                Some(plan) => println!("{}", plan.version),
                None => println!("{}", current.version),
            },
            OutputFormat::Text => {
                println!("{}", header("Version"));
                println!();
                println!(
                    "{}",
                    key_value("Source", &path_style().apply_to(current.path.display()).to_string())
                );
                println!(
                    "{}",
                    key_value("Current version", &version_style().apply_to(&current.version).to_string())
                );
                if let Some(build) = current.build_number {
                    println!("{}", key_value("Build number", &build.to_string()));
                }
                if let Some(plan) = &next {
                    println!("{}", key_value("Next version", &plan.version.to_string()));
                    println!("{}", key_value("Next build", &plan.build_number.to_string()));
                }
            }
        }

        Ok(())
    }
}
