//! Formatter registry

use std::sync::Arc;

use super::{ChangelogFormatter, MarkdownFormatter, ReleaseNotesFormatter};

/// Registry of available changelog formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self::with_repo_url(None)
    }

    /// Create the built-in formatters linking commits to a repository
    pub fn with_repo_url(repo_url: Option<&str>) -> Self {
        let mut markdown = MarkdownFormatter::new();
        let mut notes = ReleaseNotesFormatter::new();
        if let Some(url) = repo_url {
            markdown = markdown.with_repo_url(url);
            notes = notes.with_repo_url(url);
        }

        Self {
            formatters: vec![Arc::new(markdown), Arc::new(notes)],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            formatters: Vec::new(),
        }
    }

    /// Register a formatter
    pub fn register<F: ChangelogFormatter + 'static>(&mut self, formatter: F) {
        self.formatters.push(Arc::new(formatter));
    }

    /// Get formatter by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters.iter().find(|f| f.name() == name).cloned()
    }

    /// Get all registered formatters
    pub fn all(&self) -> &[Arc<dyn ChangelogFormatter>] {
        &self.formatters
    }

    /// Get all formatter names
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.names(), vec!["markdown", "release-notes"]);
    }

    #[test]
    fn test_get_by_name() {
        let registry = FormatterRegistry::new();
        assert!(registry.get("markdown").is_some());
        assert!(registry.get("release-notes").is_some());
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = FormatterRegistry::empty();
        assert!(registry.all().is_empty());

        registry.register(MarkdownFormatter::new());
        assert_eq!(registry.names(), vec!["markdown"]);
    }
}
