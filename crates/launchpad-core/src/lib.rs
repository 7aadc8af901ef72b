//! Launchpad Core - Core library for mobile release versioning
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the Launchpad crates.

pub mod config;
pub mod error;
pub mod fs;
pub mod types;
pub mod workflow;

pub use error::{LaunchpadError, Result};
pub use types::{BuildStrategy, ManifestFormat};
