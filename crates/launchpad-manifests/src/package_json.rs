//! package.json version handling
//!
//! The version field is edited in place so key order, indentation and
//! unrelated formatting survive. The file has no build number field.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use launchpad_core::error::Result;
use launchpad_core::ManifestFormat;
use launchpad_strategies::{BuildNumber, SemanticVersion};

use crate::traits::{field_not_found, parse_failed, ManifestAdapter, ManifestVersion};

static VERSION_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<prefix>"version"\s*:\s*)"(?P<value>(?:[^"\\]|\\.)*)""#).expect("Invalid regex")
});

/// Adapter for `package.json`
#[derive(Debug, Clone, Default)]
pub struct PackageJsonAdapter;

impl PackageJsonAdapter {
    /// Create a new adapter
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, path: &Path, content: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| parse_failed(path, self.format(), e))?;

        match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(parse_failed(path, self.format(), "top level is not an object").into()),
        }
    }
}

/// Nesting depth at a byte offset and whether it falls inside a string
fn structure_at(content: &str, offset: usize) -> (usize, bool) {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for b in content.as_bytes()[..offset].iter() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    (depth, in_string)
}

impl ManifestAdapter for PackageJsonAdapter {
    fn format(&self) -> ManifestFormat {
        ManifestFormat::PackageJson
    }

    fn validate(&self, path: &Path, content: &str) -> Result<()> {
        self.parse(path, content).map(|_| ())
    }

    fn read_version(&self, path: &Path, content: &str) -> Result<ManifestVersion> {
        let map = self.parse(path, content)?;
        let version = map
            .get("version")
            .and_then(|v| v.as_str())
            .ok_or_else(|| field_not_found(path, "version"))?;

        Ok(ManifestVersion {
            version: version.to_string(),
            build_number: None,
        })
    }

    fn apply(
        &self,
        path: &Path,
        content: &str,
        version: &SemanticVersion,
        _build: Option<BuildNumber>,
    ) -> Result<String> {
        self.read_version(path, content)?;

        let field = VERSION_FIELD_REGEX
            .captures_iter(content)
            .find(|caps| {
                let start = caps.get(0).map_or(0, |m| m.start());
                structure_at(content, start) == (1, false)
            })
            .ok_or_else(|| field_not_found(path, "version"))?;

        let (Some(whole), Some(prefix)) = (field.get(0), field.name("prefix")) else {
            return Err(field_not_found(path, "version").into());
        };

        let mut updated = String::with_capacity(content.len());
        updated.push_str(&content[..whole.start()]);
        updated.push_str(prefix.as_str());
        updated.push_str(&serde_json::to_string(&version.to_string())?);
        updated.push_str(&content[whole.end()..]);

        debug!(path = %path.display(), %version, "package.json version replaced");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    const PACKAGE: &str = r#"{
  "name": "acme-app",
  "engines": { "version": "18" },
  "version": "1.2.3",
  "scripts": {
    "release": "launchpad bump --minor"
  }
}
"#;

    #[test]
    fn test_read_version() {
        let adapter = PackageJsonAdapter::new();
        let read = adapter.read_version(Path::new("package.json"), PACKAGE).unwrap();
        assert_eq!(read.version, "1.2.3");
        assert_eq!(read.build_number, None);
    }

    #[test]
    fn test_apply_replaces_top_level_field_only() {
        let adapter = PackageJsonAdapter::new();
        let updated = adapter
            .apply(Path::new("package.json"), PACKAGE, &v("1.3.0"), Some(BuildNumber::new(7)))
            .unwrap();

        assert_eq!(updated, PACKAGE.replace("\"version\": \"1.2.3\"", "\"version\": \"1.3.0\""));
        assert!(updated.contains(r#""engines": { "version": "18" }"#));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let adapter = PackageJsonAdapter::new();
        let path = Path::new("package.json");
        let once = adapter.apply(path, PACKAGE, &v("2.0.0"), None).unwrap();
        let twice = adapter.apply(path, &once, &v("2.0.0"), None).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_escapes_build_metadata() {
        let adapter = PackageJsonAdapter::new();
        let path = Path::new("package.json");
        let version = v(r#"1.3.0+a"b\c"#);

        let once = adapter.apply(path, PACKAGE, &version, None).unwrap();
        assert!(once.contains(r#""version": "1.3.0+a\"b\\c""#));

        let read = adapter.read_version(path, &once).unwrap();
        assert_eq!(read.version, r#"1.3.0+a"b\c"#);
        assert_eq!(adapter.apply(path, &once, &version, None).unwrap(), once);
    }

    #[test]
    fn test_invalid_json() {
        let adapter = PackageJsonAdapter::new();
        let result = adapter.apply(Path::new("package.json"), "{ \"version\": ", &v("1.0.0"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_version() {
        let adapter = PackageJsonAdapter::new();
        let result = adapter.read_version(Path::new("package.json"), r#"{"name": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_structure_at() {
        let content = r#"{"a": {"b": "}"}, "c": 1}"#;
        let c = content.find("\"c\"").unwrap();
        assert_eq!(structure_at(content, c), (1, false));
        let b = content.find("\"b\"").unwrap();
        assert_eq!(structure_at(content, b), (2, false));
    }
}
