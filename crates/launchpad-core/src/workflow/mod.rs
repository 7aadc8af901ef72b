//! Workflow helpers shared by the release planner and the CLI

mod version;

pub use version::*;
