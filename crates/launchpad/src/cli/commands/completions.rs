//! Shell completion scripts

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use launchpad_core::fs::write_atomic;

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

const BIN_NAME: &str = "launchpad";

/// Print or install a completion script
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Completion script for `shell` as bytes
fn render(shell: Shell) -> Vec<u8> {
    let mut script = Vec::new();
    generate(shell, &mut Cli::command(), BIN_NAME, &mut script);
    script
}

impl CompletionsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, output = ?self.output, "executing completions command");
        let script = render(self.shell);

        match &self.output {
            Some(path) => {
                write_atomic(path, &script)?;
                if !cli.quiet {
                    output::success(&format!(
                        "{} completions written to {}",
                        self.shell,
                        path_style().apply_to(path.display())
                    ));
                }
            }
            None => std::io::stdout().lock().write_all(&script)?,
        }

        Ok(())
    }
}
