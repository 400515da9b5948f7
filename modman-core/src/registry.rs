//! Read-only module registry
//!
//! An immutable name -> module view over one manifest snapshot, built once
//! per refresh. The registry performs no validation: dangling references and
//! cycles are the resolver's concern.

use std::collections::HashMap;

use crate::manifest::{Manifest, Module};

/// Immutable lookup view over a manifest.
#[derive(Debug, Clone)]
pub struct Registry {
    github_username: String,
    modules: Vec<Module>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from a fetched manifest.
    pub fn from_manifest(manifest: Manifest) -> Self {
        let mut by_name = HashMap::with_capacity(manifest.modules.len());
        for (i, module) in manifest.modules.iter().enumerate() {
            // First occurrence wins if the manifest repeats a name.
            by_name.entry(module.name.clone()).or_insert(i);
        }

        tracing::debug!("registry built: {} module(s)", manifest.modules.len());

        Self {
            github_username: manifest.github_username,
            modules: manifest.modules,
            by_name,
        }
    }

    /// Look up a module by name.
    pub fn lookup(&self, name: &str) -> Option<&Module> {
        self.by_name.get(name).map(|&i| &self.modules[i])
    }

    /// All modules, in manifest order.
    pub fn all(&self) -> &[Module] {
        &self.modules
    }

    /// Installer-facing package id for a module name.
    pub fn package_id(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|m| m.package_id.as_str())
    }

    /// SSH-style git remote for a module, derived from the manifest's GitHub
    /// account and the module name.
    pub fn git_url(&self, name: &str) -> String {
        format!("git@github.com:{}/{}.git", self.github_username, name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_module(name: &str, package_id: &str, deps: &[&str]) -> Module {
        Module {
            name: name.to_string(),
            description: String::new(),
            package_id: package_id.to_string(),
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn sample_registry() -> Registry {
        Registry::from_manifest(Manifest {
            github_username: "acme-modules".to_string(),
            modules: vec![
                make_module("core-utils", "com.acme.core-utils", &[]),
                make_module("audio", "com.acme.audio", &["core-utils"]),
            ],
        })
    }

    #[test]
    fn test_lookup() {
        let registry = sample_registry();

        let module = registry.lookup("audio").unwrap();
        assert_eq!(module.package_id, "com.acme.audio");
        assert_eq!(module.dependencies, vec!["core-utils"]);

        assert!(registry.lookup("ghost").is_none());
    }

    #[test]
    fn test_all_preserves_manifest_order() {
        let registry = sample_registry();
        let names: Vec<&str> = registry.all().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["core-utils", "audio"]);
    }

    #[test]
    fn test_package_id() {
        let registry = sample_registry();
        assert_eq!(registry.package_id("core-utils"), Some("com.acme.core-utils"));
        assert_eq!(registry.package_id("ghost"), None);
    }

    #[test]
    fn test_git_url() {
        let registry = sample_registry();
        assert_eq!(
            registry.git_url("audio"),
            "git@github.com:acme-modules/audio.git"
        );
    }

    #[test]
    fn test_duplicate_name_first_wins() {
        let registry = Registry::from_manifest(Manifest {
            github_username: "acme-modules".to_string(),
            modules: vec![
                make_module("audio", "com.acme.audio", &[]),
                make_module("audio", "com.acme.audio-v2", &[]),
            ],
        });

        assert_eq!(registry.package_id("audio"), Some("com.acme.audio"));
        // all() still reports the document as-is.
        assert_eq!(registry.len(), 2);
    }
}
