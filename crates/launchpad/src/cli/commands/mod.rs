//! CLI commands

mod bump;
mod changelog;
mod completions;
mod init;
mod version;

pub use bump::BumpCommand;
pub use changelog::ChangelogCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use version::VersionCommand;
