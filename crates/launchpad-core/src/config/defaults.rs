//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "launchpad.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "launchpad.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".launchpad.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".launchpad.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Launchpad Configuration

versioning:
  tag_format: "v{version}"
  # increment, or timestamp (YYYYMMDDHHmm, exceeds the Android versionCode limit)
  build_strategy: increment

git:
  remote: origin
  branch: main
  commit: true
  tag: false
  push: false
  commit_message: "chore(release): bump version to {version}+{build}"
  tag_message: "Release {version}"

changelog:
  file: CHANGELOG.md
  # repo_url: https://github.com/acme/app
  dual_list_breaking: true
  include_merges: false
  sections:
    breaking: true
    feat: true
    fix: true
    docs: false
    maintenance: false

manifests:
  sources:
    - pubspec.yaml
    - package.json
  targets:
    - path: pubspec.yaml
      required: true
    - path: package.json
    - path: ios/Runner/Info.plist
    - path: android/app/build.gradle
"#;
