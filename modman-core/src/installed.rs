//! Installed-set view
//!
//! A snapshot of which packages the external installer currently reports as
//! installed, supplied fresh before each resolution. The engine never
//! mutates it; reverse dependency queries scan the declared dependency
//! lists for a match against the target.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One installed package as enumerated by the external installer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPackage {
    /// Installer-facing package id.
    pub package_id: String,

    /// Package ids this package declares as dependencies.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Immutable snapshot of the currently installed packages.
#[derive(Debug, Clone, Default)]
pub struct InstalledSet {
    packages: Vec<InstalledPackage>,
    ids: HashSet<String>,
}

impl InstalledSet {
    pub fn new(packages: Vec<InstalledPackage>) -> Self {
        let ids = packages.iter().map(|p| p.package_id.clone()).collect();
        Self { packages, ids }
    }

    /// Whether a package id is currently installed.
    pub fn contains(&self, package_id: &str) -> bool {
        self.ids.contains(package_id)
    }

    /// Installed packages that directly declare `package_id` as a dependency.
    ///
    /// Linear scan over the declared dependency lists. Expected installed
    /// sets are tens to low hundreds of packages, so no reverse index is
    /// kept.
    pub fn dependents_of(&self, package_id: &str) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| p.dependencies.iter().any(|d| d == package_id))
            .map(|p| p.package_id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
