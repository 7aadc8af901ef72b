//! Launchpad Strategies - Version arithmetic for release management
//!
//! This crate provides the semantic version value type, bump directives and
//! build number derivation.

mod buildnum;
mod semver;
pub mod types;

pub use buildnum::BuildNumber;
pub use semver::{PrereleaseIdentifier, SemanticVersion};
pub use types::BumpDirective;
