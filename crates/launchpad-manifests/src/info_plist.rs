//! iOS Info.plist version handling
//!
//! `CFBundleShortVersionString` carries the marketing version and
//! `CFBundleVersion` the build number. The XML is edited in place rather
//! than re-serialized so Xcode's formatting is kept.

use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use launchpad_core::error::Result;
use launchpad_core::ManifestFormat;
use launchpad_strategies::{BuildNumber, SemanticVersion};

use crate::traits::{field_not_found, parse_failed, ManifestAdapter, ManifestVersion};

const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const BUNDLE_VERSION_KEY: &str = "CFBundleVersion";

static SHORT_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| string_entry_regex(SHORT_VERSION_KEY));
static BUNDLE_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| string_entry_regex(BUNDLE_VERSION_KEY));

static STRUCTURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<dict\s*>|</dict\s*>").expect("Invalid regex"));

fn string_entry_regex(key: &str) -> Regex {
    Regex::new(&format!(
        r"(?P<open><key>{}</key>\s*<string>)(?P<value>[^<]*)(?P<close></string>)",
        regex::escape(key)
    ))
    .expect("Invalid regex")
}

/// Adapter for iOS `Info.plist`
#[derive(Debug, Clone, Default)]
pub struct InfoPlistAdapter;

impl InfoPlistAdapter {
    /// Create a new adapter
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, path: &Path, content: &str) -> Result<plist::Dictionary> {
        let value = plist::Value::from_reader(Cursor::new(content.as_bytes()))
            .map_err(|e| parse_failed(path, self.format(), e))?;

        value
            .into_dictionary()
            .ok_or_else(|| parse_failed(path, self.format(), "root is not a dictionary").into())
    }
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Whether `offset` sits directly in the root dictionary, outside comments
fn is_root_entry(content: &str, offset: usize) -> bool {
    let before = &content[..offset];
    let mut depth = 0usize;
    let mut scanned = 0;

    for token in STRUCTURE_REGEX.find_iter(before) {
        match token.as_str() {
            t if t.starts_with("<!--") => {}
            t if t.starts_with("</") => depth = depth.saturating_sub(1),
            _ => depth += 1,
        }
        scanned = token.end();
    }

    depth == 1 && !before[scanned..].contains("<!--")
}

/// Replace the string value of one root key, returning `None` when absent
fn replace_entry(regex: &Regex, content: &str, value: &str) -> Option<String> {
    let caps: Captures<'_> = regex
        .captures_iter(content)
        .find(|caps| caps.get(0).is_some_and(|m| is_root_entry(content, m.start())))?;
    let whole = caps.get(0)?;

    let mut updated = String::with_capacity(content.len());
    updated.push_str(&content[..whole.start()]);
    updated.push_str(&caps["open"]);
    updated.push_str(&escape_xml(value));
    updated.push_str(&caps["close"]);
    updated.push_str(&content[whole.end()..]);
    Some(updated)
}

impl ManifestAdapter for InfoPlistAdapter {
    fn format(&self) -> ManifestFormat {
        ManifestFormat::InfoPlist
    }

    fn validate(&self, path: &Path, content: &str) -> Result<()> {
        self.parse(path, content).map(|_| ())
    }

    fn read_version(&self, path: &Path, content: &str) -> Result<ManifestVersion> {
        let dict = self.parse(path, content)?;
        let version = dict
            .get(SHORT_VERSION_KEY)
            .and_then(plist::Value::as_string)
            .ok_or_else(|| field_not_found(path, SHORT_VERSION_KEY))?;
        let build_number = dict
            .get(BUNDLE_VERSION_KEY)
            .and_then(plist::Value::as_string)
            .and_then(|s| s.parse::<BuildNumber>().ok());

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

        let mut updated = replace_entry(&SHORT_VERSION_REGEX, content, &version.to_string())
            .ok_or_else(|| field_not_found(path, SHORT_VERSION_KEY))?;

        if let Some(build) = build {
            updated = replace_entry(&BUNDLE_VERSION_REGEX, &updated, &build.to_string())
                .ok_or_else(|| field_not_found(path, BUNDLE_VERSION_KEY))?;
        }

        debug!(path = %path.display(), %version, build = ?build, "Info.plist versions replaced");
        Ok(updated)
    }
}
