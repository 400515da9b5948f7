//! Module manifest parsing
//!
//! The manifest is the declarative JSON document listing every known module,
//! its installer-facing package id, and its dependency edges by module name.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// The module manifest document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// GitHub account hosting every module repository.
    pub github_username: String,

    /// All known modules.
    pub modules: Vec<Module>,
}

/// One installable unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique module name. Dependency references and git remote names use it.
    pub name: String,

    /// Display-only description.
    #[serde(default)]
    pub description: String,

    /// Identifier the external installer recognizes.
    pub package_id: String,

    /// Names of modules this one depends on. May be empty; a name with no
    /// manifest entry is caught at resolution time, not here.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Manifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::ManifestUnavailable {
            reason: format!("invalid manifest JSON: {e}"),
        })
    }

    /// Load a manifest from a local file (an offline snapshot).
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ManifestUnavailable {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_json(&content)
    }
}
