//! Operation planning
//!
//! Turns a resolved closure plus the requested action into the request shape
//! the external installer accepts. The resolver only computes closures; the
//! planner decides how consent gates an uninstall that would break other
//! installed modules.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::installed::InstalledSet;
use crate::registry::Registry;
use crate::resolver;

/// The request handed to the external install/uninstall primitive.
///
/// `add` carries git remote locators, `remove` carries package ids. Both
/// lists are duplicate-free; the installer's ordering semantics are its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRequest {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl PackageRequest {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Outcome of planning an uninstall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallPlan {
    /// Nothing installed depends on the target; remove it alone.
    Ready(PackageRequest),

    /// Installed modules would break; the caller must choose a policy.
    NeedsConfirmation(CascadePrompt),
}

/// The affected-dependents prompt surfaced to the caller.
///
/// Consent expands the plan to the modules that would break (the reverse
/// dependents closure), never to the target's own forward dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePrompt {
    /// Package id of the uninstall target.
    pub target: String,

    /// Installed package ids that transitively depend on the target.
    pub dependents: Vec<String>,
}

impl CascadePrompt {
    /// Remove only the target, leaving the dependents behind with an
    /// unsatisfiable dependency.
    pub fn target_only(&self) -> PackageRequest {
        PackageRequest {
            add: Vec::new(),
            remove: vec![self.target.clone()],
        }
    }

    /// Remove the target together with every module that would break.
    pub fn cascade(&self) -> PackageRequest {
        let mut remove = Vec::with_capacity(1 + self.dependents.len());
        remove.push(self.target.clone());
        remove.extend(self.dependents.iter().cloned());
        PackageRequest {
            add: Vec::new(),
            remove,
        }
    }
}

/// Plans install/uninstall requests against one registry snapshot and one
/// installed-set snapshot. A resolution pass borrows both for its whole
/// duration, so it can never span two different refreshes.
pub struct Planner<'a> {
    registry: &'a Registry,
    installed: &'a InstalledSet,
}

impl<'a> Planner<'a> {
    pub fn new(registry: &'a Registry, installed: &'a InstalledSet) -> Self {
        Self { registry, installed }
    }

    /// Install plan: the target and its full dependency closure, target
    /// first, each name mapped to its git locator.
    ///
    /// Already-installed modules are not filtered out. Re-specifying a
    /// package is the installer's concern; duplicates would be ours, and the
    /// closure's visited set rules them out.
    pub fn plan_install(&self, name: &str) -> Result<PackageRequest> {
        let closure = resolver::resolve_dependencies(self.registry, name)?;

        let mut add = Vec::with_capacity(1 + closure.len());
        add.push(self.registry.git_url(name));
        add.extend(closure.iter().map(|dep| self.registry.git_url(dep)));

        tracing::info!("install plan for '{name}': {} package(s)", add.len());

        Ok(PackageRequest {
            add,
            remove: Vec::new(),
        })
    }

    /// Uninstall plan for a module by name.
    ///
    /// The default plan removes only the target. When installed modules
    /// depend on it, the caller receives the affected list and chooses
    /// whether the plan expands to the would-break closure.
    pub fn plan_uninstall(&self, name: &str) -> Result<UninstallPlan> {
        let module = self.registry.lookup(name).ok_or_else(|| Error::UnknownTarget {
            target: name.to_string(),
        })?;

        let dependents = resolver::resolve_dependents(self.installed, &module.package_id)?;

        if dependents.is_empty() {
            tracing::info!("uninstall plan for '{name}': no dependents");
            return Ok(UninstallPlan::Ready(PackageRequest {
                add: Vec::new(),
                remove: vec![module.package_id.clone()],
            }));
        }

        tracing::info!(
            "uninstall of '{name}' affects {} dependent(s)",
            dependents.len()
        );

        Ok(UninstallPlan::NeedsConfirmation(CascadePrompt {
            target: module.package_id.clone(),
            dependents,
        }))
    }
}
