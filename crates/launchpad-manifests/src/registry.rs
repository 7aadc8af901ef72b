//! Adapter registry

use std::path::Path;
use std::sync::Arc;

use launchpad_core::ManifestFormat;

use crate::gradle::GradleAdapter;
use crate::info_plist::InfoPlistAdapter;
use crate::package_json::PackageJsonAdapter;
use crate::pubspec::PubspecAdapter;
use crate::traits::ManifestAdapter;

/// Registry of available manifest adapters
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn ManifestAdapter>>,
}

impl AdapterRegistry {
    /// Create a new registry with all built-in adapters
    pub fn new() -> Self {
        Self {
            adapters: vec![
                Arc::new(PackageJsonAdapter::new()),
                Arc::new(PubspecAdapter::new()),
                Arc::new(InfoPlistAdapter::new()),
                Arc::new(GradleAdapter::new()),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Register an adapter, replacing any adapter for the same format
    pub fn register<A: ManifestAdapter + 'static>(&mut self, adapter: A) {
        self.adapters.retain(|a| a.format() != adapter.format());
        self.adapters.push(Arc::new(adapter));
    }

    /// Get the adapter for a format
    pub fn get(&self, format: ManifestFormat) -> Option<Arc<dyn ManifestAdapter>> {
        self.adapters.iter().find(|a| a.format() == format).cloned()
    }

    /// Get the adapter for a file, inferring the format from its name
    pub fn detect(&self, path: &Path) -> Option<Arc<dyn ManifestAdapter>> {
        ManifestFormat::detect(path).and_then(|format| self.get(format))
    }

    /// Get all registered adapters
    pub fn all(&self) -> &[Arc<dyn ManifestAdapter>] {
        &self.adapters
    }

    /// Get adapter names
    pub fn names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_format() {
        let registry = AdapterRegistry::new();
        for format in ManifestFormat::all() {
            assert!(registry.get(*format).is_some(), "no adapter for {}", format);
        }
    }

    #[test]
    fn test_detect_adapter() {
        let registry = AdapterRegistry::new();

        let adapter = registry.detect(Path::new("ios/Runner/Info.plist")).unwrap();
        assert_eq!(adapter.format(), ManifestFormat::InfoPlist);
        let adapter = registry.detect(Path::new("android/app/build.gradle.kts")).unwrap();
        assert_eq!(adapter.format(), ManifestFormat::Gradle);
        assert!(registry.detect(Path::new("README.md")).is_none());
    }

    #[test]
    fn test_adapter_names() {
        let names = AdapterRegistry::new().names();
        assert_eq!(names, vec!["package-json", "pubspec", "info-plist", "gradle"]);
    }

    #[test]
    fn test_register_replaces_same_format() {
        let mut registry = AdapterRegistry::empty();
        assert!(registry.get(ManifestFormat::Gradle).is_none());

        registry.register(GradleAdapter::new());
        registry.register(GradleAdapter::new());
        assert_eq!(registry.all().len(), 1);
    }
}
