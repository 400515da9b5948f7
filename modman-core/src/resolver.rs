//! Dependency closure resolution
//!
//! Both resolution directions share one visited-set-guarded depth-first
//! traversal over a fallible neighbors function. The manifest is untrusted
//! external input: diamonds, self-references, and accidental cycles must
//! terminate, and a dependency name with no manifest entry is a hard error
//! rather than a silently dropped edge.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::installed::InstalledSet;
use crate::registry::Registry;

/// Transitive dependency closure of `name`, excluding `name` itself.
///
/// Order is first-discovery: depth-first, following each module's declared
/// dependency order. Each module appears exactly once. Together with the
/// target, the result is the full set of modules that must exist
/// post-install.
pub fn resolve_dependencies(registry: &Registry, name: &str) -> Result<Vec<String>> {
    if registry.lookup(name).is_none() {
        return Err(Error::UnknownTarget {
            target: name.to_string(),
        });
    }

    closure_from(name, |module| {
        // Only names already verified against the registry reach this point.
        let deps = &registry
            .lookup(module)
            .ok_or_else(|| Error::UnknownTarget {
                target: module.to_string(),
            })?
            .dependencies;

        // Every declared edge is checked, including edges to modules already
        // in the closure: an install must never proceed while any reachable
        // declaration cannot be resolved.
        for dep in deps {
            if registry.lookup(dep).is_none() {
                return Err(Error::DanglingDependency {
                    module: module.to_string(),
                    dependency: dep.clone(),
                });
            }
        }

        Ok(deps.clone())
    })
}

/// Installed packages that transitively depend on `package_id`, excluding
/// `package_id` itself.
///
/// This is the would-break closure for an uninstall: every installed package
/// that would be left with an unsatisfiable dependency if the target were
/// removed. Restricted to the installed set by construction.
pub fn resolve_dependents(installed: &InstalledSet, package_id: &str) -> Result<Vec<String>> {
    if !installed.contains(package_id) {
        return Err(Error::UnknownTarget {
            target: package_id.to_string(),
        });
    }

    closure_from(package_id, |pkg| {
        Ok(installed
            .dependents_of(pkg)
            .into_iter()
            .map(str::to_string)
            .collect())
    })
}

/// Depth-first closure from `root` over `neighbors`, excluding `root`.
///
/// The visited set makes diamonds, self-references, and cycles no-ops, so
/// traversal terminates on any input. Children are pushed in reverse
/// declaration order to keep the output in recursive first-discovery order.
fn closure_from<F>(root: &str, mut neighbors: F) -> Result<Vec<String>>
where
    F: FnMut(&str) -> Result<Vec<String>>,
{
    let mut visited: HashSet<String> = HashSet::from([root.to_string()]);
    let mut order: Vec<String> = Vec::new();
    let mut stack: Vec<String> = neighbors(root)?.into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        let next = neighbors(&node)?;
        tracing::debug!("resolved '{node}': {} edge(s)", next.len());
        order.push(node);
        stack.extend(next.into_iter().rev());
    }

    Ok(order)
}
