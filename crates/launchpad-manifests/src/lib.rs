//! Launchpad Manifests - Platform manifest adapters for release management
//!
//! This crate reads and writes the version fields of `package.json`,
//! `pubspec.yaml`, iOS `Info.plist` and Android Gradle files, and keeps a
//! set of them in sync.

pub mod gradle;
pub mod info_plist;
pub mod package_json;
pub mod pubspec;
pub mod registry;
pub mod synchronizer;
mod traits;

pub use gradle::GradleAdapter;
pub use info_plist::InfoPlistAdapter;
pub use package_json::PackageJsonAdapter;
pub use pubspec::PubspecAdapter;
pub use registry::AdapterRegistry;
pub use synchronizer::{
    ManifestSynchronizer, ManifestTarget, ResolvedVersion, TargetOutcome, TargetStatus,
};
pub use traits::{ManifestAdapter, ManifestVersion};
