//! pubspec.yaml version handling
//!
//! Flutter keeps both numbers in one field: `version: 1.2.3+45`, where the
//! `+` suffix is the build number. The line is rewritten in place so quotes
//! and trailing comments survive.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use launchpad_core::error::Result;
use launchpad_core::ManifestFormat;
use launchpad_strategies::{BuildNumber, SemanticVersion};

use crate::traits::{field_not_found, parse_failed, ManifestAdapter, ManifestVersion};

static VERSION_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(?P<prefix>version:[ \t]*)(?P<value>"[^"\r\n]*"|'[^'\r\n]*'|[^\s#]+)"#)
        .expect("Invalid regex")
});

/// Adapter for Flutter `pubspec.yaml`
#[derive(Debug, Clone, Default)]
pub struct PubspecAdapter;

impl PubspecAdapter {
    /// Create a new adapter
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, path: &Path, content: &str) -> Result<serde_yaml::Mapping> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| parse_failed(path, self.format(), e))?;

        match value {
            serde_yaml::Value::Mapping(map) => Ok(map),
            _ => Err(parse_failed(path, self.format(), "top level is not a mapping").into()),
        }
    }
}

/// Split `1.2.3+45` into the version and a numeric build suffix
fn split_build(value: &str) -> (&str, Option<BuildNumber>) {
    match value.rsplit_once('+') {
        Some((version, build)) => match build.parse::<BuildNumber>() {
            Ok(build) => (version, Some(build)),
            Err(_) => (value, None),
        },
        None => (value, None),
    }
}

fn unquote(value: &str) -> (&str, Option<char>) {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return (inner, Some(quote));
        }
    }
    (value, None)
}

impl ManifestAdapter for PubspecAdapter {
    fn format(&self) -> ManifestFormat {
        ManifestFormat::Pubspec
    }

    fn validate(&self, path: &Path, content: &str) -> Result<()> {
        self.parse(path, content).map(|_| ())
    }

    fn read_version(&self, path: &Path, content: &str) -> Result<ManifestVersion> {
        let map = self.parse(path, content)?;
        let raw = match map.get("version") {
            Some(serde_yaml::Value::String(s)) => s.clone(),
            Some(serde_yaml::Value::Number(n)) => n.to_string(),
            _ => return Err(field_not_found(path, "version").into()),
        };

        let (version, build_number) = split_build(raw.trim());
        Ok(ManifestVersion {
            version: version.to_string(),
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
        self.validate(path, content)?;

        let caps = VERSION_LINE_REGEX
            .captures(content)
            .ok_or_else(|| field_not_found(path, "version"))?;
        let (Some(value), Some(prefix)) = (caps.name("value"), caps.name("prefix")) else {
            return Err(field_not_found(path, "version").into());
        };

        let (current, quote) = unquote(value.as_str());
        let build = build.or_else(|| split_build(current).1);

        // The `+` slot holds the build number, so metadata is not written here
        let core = SemanticVersion {
            build_metadata: None,
            ..version.clone()
        };
        let mut rendered = match build {
            Some(build) => format!("{}+{}", core, build),
            None => core.to_string(),
        };
        if let Some(quote) = quote {
            rendered = format!("{quote}{rendered}{quote}");
        }

        let mut updated = String::with_capacity(content.len());
        updated.push_str(&content[..prefix.end()]);
        updated.push_str(&rendered);
        updated.push_str(&content[value.end()..]);

        debug!(path = %path.display(), value = %rendered, "pubspec version replaced");
        Ok(updated)
    }
}
