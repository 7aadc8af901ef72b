//! Android Gradle version handling
//!
//! Supports the Groovy form (`versionName "1.2.3"`, `versionCode 45`) and the
//! Kotlin DSL assignment form (`versionName = "1.2.3"`, `versionCode = 45`).
//! Only the first uncommented occurrence of each field is touched.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use launchpad_core::error::{ManifestError, Result};
use launchpad_core::ManifestFormat;
use launchpad_strategies::{BuildNumber, SemanticVersion};

use crate::traits::{field_not_found, ManifestAdapter, ManifestVersion};

/// Largest `versionCode` Google Play accepts; also within a Kotlin `Int`
pub const MAX_VERSION_CODE: u64 = 2_100_000_000;

static VERSION_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^(?P<prefix>[ \t]*versionName(?:[ \t]*=[ \t]*|[ \t]+))(?:"(?P<double>(?:[^"\\\r\n]|\\.)*)"|'(?P<single>[^'\r\n]*)')"#,
    )
    .expect("Invalid regex")
});

static VERSION_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?P<prefix>[ \t]*versionCode(?:[ \t]*=[ \t]*|[ \t]+))(?P<value>\d+)\b")
        .expect("Invalid regex")
});

/// Adapter for `build.gradle` and `build.gradle.kts`
#[derive(Debug, Clone, Default)]
pub struct GradleAdapter;

impl GradleAdapter {
    /// Create a new adapter
    pub fn new() -> Self {
        Self
    }
}

/// Double-quoted Groovy/Kotlin literal; `$` would start a template
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn unquote(escaped: &str) -> String {
    let mut value = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.extend(chars.next()),
            _ => value.push(c),
        }
    }
    value
}

/// Replace the first match's value with `value`, keeping its prefix
fn replace_first(regex: &Regex, content: &str, value: &str) -> Option<String> {
    let caps = regex.captures(content)?;
    let whole = caps.get(0)?;
    let prefix = caps.name("prefix")?;

    let mut updated = String::with_capacity(content.len());
    updated.push_str(&content[..whole.start()]);
    updated.push_str(prefix.as_str());
    updated.push_str(value);
    updated.push_str(&content[whole.end()..]);
    Some(updated)
}

impl ManifestAdapter for GradleAdapter {
    fn format(&self) -> ManifestFormat {
        ManifestFormat::Gradle
    }

    /// Gradle scripts are code, so there is nothing to validate beyond the
    /// field patterns themselves
    fn validate(&self, _path: &Path, _content: &str) -> Result<()> {
        Ok(())
    }

    fn read_version(&self, path: &Path, content: &str) -> Result<ManifestVersion> {
        let caps = VERSION_NAME_REGEX
            .captures(content)
            .ok_or_else(|| field_not_found(path, "versionName"))?;
        let version = match (caps.name("double"), caps.name("single")) {
            (Some(double), _) => unquote(double.as_str()),
            (None, Some(single)) => single.as_str().to_string(),
            (None, None) => return Err(field_not_found(path, "versionName").into()),
        };
        let build_number = VERSION_CODE_REGEX
            .captures(content)
            .and_then(|caps| caps["value"].parse::<BuildNumber>().ok());

        Ok(ManifestVersion {
            version,
            build_number,
        })
    }

    fn apply(
        &self,
        path: &Path,
        content: &str,
        version: &SemanticVersion,
        build: Option<BuildNumber>,
    ) -> Result<String> {
        if let Some(build) = build.filter(|b| b.value() > MAX_VERSION_CODE) {
            return Err(ManifestError::ValueOutOfRange {
                path: path.to_path_buf(),
                field: "versionCode".to_string(),
                value: build.value(),
                max: MAX_VERSION_CODE,
            }
            .into());
        }

        let mut updated = replace_first(&VERSION_NAME_REGEX, content, &quote(&version.to_string()))
            .ok_or_else(|| field_not_found(path, "versionName"))?;

        if let Some(build) = build {
            updated = replace_first(&VERSION_CODE_REGEX, &updated, &build.to_string())
                .ok_or_else(|| field_not_found(path, "versionCode"))?;
        }

        debug!(path = %path.display(), %version, build = ?build, "gradle versions replaced");
        Ok(updated)
    }
}
