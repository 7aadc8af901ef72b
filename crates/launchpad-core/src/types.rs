//! Core types for Launchpad

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Platform manifest formats the synchronizer knows how to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestFormat {
    /// `package.json` style key-value manifest
    PackageJson,
    /// `pubspec.yaml` style platform manifest (`version: 1.2.3+4`)
    Pubspec,
    /// iOS `Info.plist`
    InfoPlist,
    /// Android `build.gradle` / `build.gradle.kts`
    Gradle,
}

impl ManifestFormat {
    /// All supported formats
    pub fn all() -> &'static [ManifestFormat] {
        &[
            ManifestFormat::PackageJson,
            ManifestFormat::Pubspec,
            ManifestFormat::InfoPlist,
            ManifestFormat::Gradle,
        ]
    }

    /// Returns the string representation of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PackageJson => "package-json",
            Self::Pubspec => "pubspec",
            Self::InfoPlist => "info-plist",
            Self::Gradle => "gradle",
        }
    }

    /// Infer the format from a manifest file name
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;

        if name.ends_with(".json") {
            Some(Self::PackageJson)
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            Some(Self::Pubspec)
        } else if name.ends_with(".plist") {
            Some(Self::InfoPlist)
        } else if name.ends_with(".gradle") || name.ends_with(".gradle.kts") {
            Some(Self::Gradle)
        } else {
            None
        }
    }

}

impl std::fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ManifestFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "package-json" | "package.json" | "npm" => Ok(Self::PackageJson),
            "pubspec" | "pubspec.yaml" | "flutter" => Ok(Self::Pubspec),
            "info-plist" | "plist" | "ios" => Ok(Self::InfoPlist),
            "gradle" | "android" => Ok(Self::Gradle),
            _ => Err(format!("Unknown manifest format: {}", s)),
        }
    }
}

/// How a new build number is derived when none is given explicitly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStrategy {
    /// UTC timestamp with minute resolution (YYYYMMDDHHmm); too large for
    /// an Android `versionCode`
    Timestamp,
    /// Previous build number read from the version source, plus one
    #[default]
    Increment,
}

impl BuildStrategy {
    /// Returns the string representation of the strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Increment => "increment",
        }
    }
}

impl std::fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
