//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use launchpad_core::config::{load_config_or_default, project_root, Config};

use commands::{BumpCommand, ChangelogCommand, CompletionsCommand, InitCommand, VersionCommand};

/// Launchpad - Release versioning for multi-platform mobile projects
#[derive(Debug, Parser)]
#[command(name = "launchpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bump the version in every configured manifest
    Bump(BumpCommand),

    /// Generate a changelog from commit history
    Changelog(ChangelogCommand),

    /// Show the current version and build number
    Version(VersionCommand),

    /// Initialize a new Launchpad configuration
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Bump(ref cmd) => cmd.execute(&self),
            Commands::Changelog(ref cmd) => cmd.execute(&self),
            Commands::Version(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Whether human-readable progress should be printed
    pub fn chatty(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Text
    }
}

/// Configuration and the directory its relative paths resolve against
pub struct Project {
    /// Loaded configuration
    pub config: Config,
    /// Config file, if one was found
    pub config_path: Option<PathBuf>,
    /// Project root
    pub root: PathBuf,
}

impl Project {
    /// Load the project configuration for `cwd`
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let (config, config_path) = load_config_or_default(cwd)?;
        let root = project_root(config_path.as_deref(), cwd);
        Ok(Self {
            config,
            config_path,
            root,
        })
    }
}
