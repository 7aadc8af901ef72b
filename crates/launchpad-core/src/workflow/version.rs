//! Version workflow operations

use tracing::debug;

use crate::config::Config;

/// Format a version tag based on the configuration
pub fn format_tag(config: &Config, version: &str) -> String {
    config.versioning.tag_format.replace("{version}", version)
}

/// Fill the `{version}` and `{build}` placeholders of a message template
///
/// Without a build number, a `+{build}` suffix is dropped entirely.
pub fn render_message(template: &str, version: &str, build: Option<u64>) -> String {
    let message = match build {
        Some(build) => template.replace("{build}", &build.to_string()),
        None => template.replace("+{build}", "").replace("{build}", ""),
    };
    let message = message.replace("{version}", version);

    debug!(template, message = %message, "rendered message template");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag() {
        let config = Config::default();
        assert_eq!(format_tag(&config, "1.0.0"), "v1.0.0");
    }

    #[test]
    fn test_format_tag_custom() {
        let mut config = Config::default();
        config.versioning.tag_format = "release-{version}".to_string();
        assert_eq!(format_tag(&config, "2.1.0"), "release-2.1.0");
    }

    #[test]
    fn test_render_message() {
        let config = Config::default();
        assert_eq!(
            render_message(&config.git.commit_message, "1.3.0", Some(202410161230)),
            "chore(release): bump version to 1.3.0+202410161230"
        );
        assert_eq!(render_message("Release {version}", "1.3.0", None), "Release 1.3.0");
    }

    #[test]
    fn test_render_message_without_build() {
        assert_eq!(
            render_message("chore(release): {version}+{build}", "2.0.0", None),
            "chore(release): 2.0.0"
        );
    }
}
