//! Normalization passes around traversal
//!
//! Variables are substituted into the graph before any traversal. The kernel
//! sentinel survives traversal as an ordinary leaf and is resolved on the
//! final result. Virtual-project collapsing only ever runs on final results.

use super::error::DependsError;
use super::graph::DependencyGraph;
use super::store::{KernelMap, Variables};
use super::{KERNEL_SENTINEL, split_virtual};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace};

/// Expand variables in every dependency list and rename variable-named keys.
///
/// The first occurrence of a variable in a list is replaced in place by its
/// expansion; further occurrences are dropped. Expansion repeats until no list
/// mentions a variable, so variables may be defined in terms of each other. A
/// graph key equal to a variable name is renamed to the variable's value,
/// which must be a single project name.
pub fn substitute_variables(
    graph: &mut DependencyGraph,
    vars: &Variables,
) -> Result<(), DependsError> {
    // An acyclic chain of n variables settles within n changing rounds
    let mut settled = false;
    for round in 0..=vars.len() {
        if !expand_lists(graph, vars) {
            settled = true;
            break;
        }
        trace!(round, "Variable expansion round changed the graph");
    }
    if !settled {
        let variable = vars
            .keys()
            .find(|var| graph.iter().any(|(_, deps)| deps.contains(*var)))
            .cloned()
            .unwrap_or_default();
        return Err(DependsError::RecursiveVariable { variable });
    }

    for (var, expansion) in vars {
        if graph.contains(var) {
            let [target] = expansion.as_slice() else {
                return Err(DependsError::AmbiguousRename {
                    variable: var.clone(),
                    expansion: expansion.clone(),
                });
            };
            debug!("Renaming project {} to {}", var, target);
            graph.rename(var, target);
        }
    }
    Ok(())
}

/// One expansion pass over every list; returns whether anything changed
fn expand_lists(graph: &mut DependencyGraph, vars: &Variables) -> bool {
    let mut changed = false;
    for (var, expansion) in vars {
        for (project, deps) in graph.lists_mut() {
            let Some(pos) = deps.iter().position(|d| d == var) else {
                continue;
            };
            trace!(project = %project, variable = %var, "Expanding variable");
            deps.retain(|d| d != var);
            deps.splice(pos..pos, expansion.iter().cloned());
            changed = true;
        }
    }
    changed
}

/// Swap requested kernel projects for the kernel sentinel.
///
/// The sentinel takes the place of the first kernel project in the request.
/// Returns the kernel projects that were removed so that
/// [`resolve_kernel_token`] can narrow the sentinel back down to them.
pub fn reserve_kernel_projects(requested: &mut Vec<String>, kernels: &KernelMap) -> BTreeSet<String> {
    let kernel_names: HashSet<&str> = kernels.values().map(String::as_str).collect();
    let Some(pos) = requested
        .iter()
        .position(|p| kernel_names.contains(p.as_str()))
    else {
        return BTreeSet::new();
    };

    let reserved: BTreeSet<String> = requested
        .iter()
        .filter(|p| kernel_names.contains(p.as_str()))
        .cloned()
        .collect();
    requested.retain(|p| !reserved.contains(p));
    requested.insert(pos, KERNEL_SENTINEL.to_string());
    debug!(reserved = ?reserved, "Kernel projects replaced by sentinel");
    reserved
}

/// Replace the kernel sentinel in a result list with concrete kernel projects.
///
/// With explicit platforms, each platform's kernel is used and an unmapped
/// platform is an error. Without platforms, every distinct kernel project is
/// used, narrowed to `reserved` when that set is non-empty. Kernel names are
/// spliced in sorted order at the sentinel's first position.
pub fn resolve_kernel_token(
    projects: Vec<String>,
    kernels: &KernelMap,
    platforms: &[String],
    reserved: &BTreeSet<String>,
) -> Result<Vec<String>, DependsError> {
    let Some(pos) = projects.iter().position(|p| p == KERNEL_SENTINEL) else {
        return Ok(projects);
    };

    let resolved: BTreeSet<String> = if platforms.is_empty() {
        kernels
            .values()
            .filter(|k| reserved.is_empty() || reserved.contains(*k))
            .cloned()
            .collect()
    } else {
        platforms
            .iter()
            .map(|platform| {
                kernels
                    .get(platform)
                    .cloned()
                    .ok_or_else(|| DependsError::KernelNotFound {
                        platform: platform.clone(),
                    })
            })
            .collect::<Result<_, _>>()?
    };

    let mut result = projects;
    result.retain(|p| p != KERNEL_SENTINEL);
    result.splice(pos..pos, resolved);
    Ok(result)
}

/// Base name of a possibly-virtual project
pub fn base_name(project: &str) -> &str {
    split_virtual(project).0
}

/// Keep at most one project per base name, first seen wins.
///
/// Output preserves input order, so a sorted input gives a sorted output.
pub fn collapse_virtual<I, S>(projects: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut added_base: HashSet<String> = HashSet::new();
    let mut result = Vec::new();
    for project in projects {
        let project = project.as_ref();
        if added_base.insert(base_name(project).to_string()) {
            result.push(project.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("normalize.test.rs");
}
