//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::{debug, info};

use launchpad_core::config::{validate_config, Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};
use launchpad_core::fs::write_atomic;

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

/// Write a starter launchpad configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Replace an existing configuration file
    #[arg(short, long)]
    pub force: bool,

    /// Accept defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Where to write the configuration (`.toml` selects TOML)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Starter configuration rendered for the file type of `path`
fn render_default(path: &Path) -> anyhow::Result<String> {
    let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
    validate_config(&config)?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(toml::to_string_pretty(&config)?),
        _ => Ok(DEFAULT_CONFIG_TEMPLATE.to_string()),
    }
}

/// Configured targets split into those present under `root` and those not
fn survey_targets(root: &Path, config: &Config) -> (Vec<PathBuf>, Vec<PathBuf>) {
    config
        .manifests
        .enabled_targets()
        .map(|t| t.path.clone())
        .partition(|path| root.join(path).is_file())
}

impl InitCommand {
    /// Resolve the destination, or `None` when the user keeps the existing file
    fn destination(&self, cwd: &Path) -> anyhow::Result<Option<PathBuf>> {
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "{} already exists, pass --force to replace it",
                    path.display()
                );
            }
            let replace = Confirm::new()
                .with_prompt(format!("Replace existing {}?", path.display()))
                .default(false)
                .interact()?;
            if !replace {
                return Ok(None);
            }
        }

        if self.yes || self.output.is_some() {
            return Ok(Some(path));
        }

        let choice = Select::new()
            .with_prompt("Configuration format")
            .items(&["yaml", "toml"])
            .default(0)
            .interact()?;
        Ok(Some(if choice == 1 { path.with_extension("toml") } else { path }))
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, output = ?self.output, "executing init command");
        let cwd = std::env::current_dir()?;

        let Some(path) = self.destination(&cwd)? else {
            println!("{}", style("Kept existing configuration.").yellow());
            return Ok(());
        };

        let content = render_default(&path)?;
        write_atomic(&path, content.as_bytes())?;

        let root = path.parent().unwrap_or(&cwd);
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
        let (found, missing) = survey_targets(root, &config);
        debug!(found = found.len(), missing = missing.len(), "surveyed manifest targets");

        if cli.quiet {
            return Ok(());
        }

        output::success(&format!(
            "Wrote {}",
            path_style().apply_to(path.display())
        ));
        for target in &found {
            output::info(&format!("found {}", path_style().apply_to(target.display())));
        }
        if !missing.is_empty() {
            output::warning(&format!(
                "Not in this project: {}. Remove or adjust them under manifests.targets.",
                missing
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        println!();
        println!(
            "Preview a release with {}",
            style("launchpad bump --patch --dry-run").cyan()
        );

        Ok(())
    }
}
