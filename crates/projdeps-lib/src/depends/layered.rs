//! Layered source traversal
//!
//! Walks the request outward one layer of dependencies at a time, keeping
//! projects needed from the current branch (`curr`) apart from projects
//! taken from a stabilized base (`base`). Each layer is handed to an optional
//! [`TraverseHook`] before the next one is discovered, which is how callers
//! check projects out incrementally.
//!
//! Override files are read lazily as their projects are reached. Projects
//! without one fall back to their entry in the shared graph, which feeds the
//! base tier.

use super::conf::DependsConf;
use super::environment::BuiltinProjectSource;
use super::error::DependsError;
use super::source_tree::DependsFileLocator;
use super::store::{GraphStore, KernelMap, Variables};
use super::{KERNEL_SENTINEL, is_variable_token};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Projects always treated as already checked out from the current branch
pub const BASIC_PROJECTS: [&str; 2] = ["uistring", "synopkgutils"];

/// A project set split by tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tiered {
    pub curr: BTreeSet<String>,
    pub base: BTreeSet<String>,
}

impl Tiered {
    pub fn contains(&self, project: &str) -> bool {
        self.curr.contains(project) || self.base.contains(project)
    }

    pub fn is_empty(&self) -> bool {
        self.curr.is_empty() && self.base.is_empty()
    }

    fn retain_unseen(&mut self, seen: &Tiered) {
        self.curr.retain(|p| !seen.contains(p));
        self.base.retain(|p| !seen.contains(p));
    }

    fn absorb(&mut self, other: &Tiered) {
        self.curr.extend(other.curr.iter().cloned());
        self.base.extend(other.base.iter().cloned());
    }
}

/// Snapshot handed to a [`TraverseHook`] for one layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerConfig {
    pub curr_projects: BTreeSet<String>,
    pub base_projects: BTreeSet<String>,
    pub base_target: String,
    pub include_base: bool,
}

/// Callback run between layers.
///
/// The traversal waits for it to return. An error aborts the traversal; layers
/// already reported stay reported.
pub trait TraverseHook {
    fn perform(&mut self, layer: &LayerConfig) -> anyhow::Result<()>;
}

impl<F> TraverseHook for F
where
    F: FnMut(&LayerConfig) -> anyhow::Result<()>,
{
    fn perform(&mut self, layer: &LayerConfig) -> anyhow::Result<()> {
        self(layer)
    }
}

/// Inputs of one layered traversal
#[derive(Debug, Clone)]
pub struct SourceRequest {
    pub projects: Vec<String>,
    pub platform: String,
    pub base_target: String,
    pub include_base: bool,
    pub basic_projects: BTreeSet<String>,
}

impl SourceRequest {
    pub fn new(projects: Vec<String>, platform: impl Into<String>) -> Self {
        Self {
            projects,
            platform: platform.into(),
            base_target: String::new(),
            include_base: false,
            basic_projects: BASIC_PROJECTS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_base_target(mut self, base_target: impl Into<String>) -> Self {
        self.base_target = base_target.into();
        self
    }

    pub fn with_include_base(mut self, include_base: bool) -> Self {
        self.include_base = include_base;
        self
    }

    pub fn with_basic_projects<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.basic_projects = projects.into_iter().map(Into::into).collect();
        self
    }

    fn layer(&self, projects: &Tiered) -> LayerConfig {
        LayerConfig {
            curr_projects: projects.curr.clone(),
            base_projects: projects.base.clone(),
            base_target: self.base_target.clone(),
            include_base: self.include_base,
        }
    }
}

/// Result of a layered traversal, variables already replaced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub seen: Tiered,
    pub reference_only: Tiered,
    pub for_packaging: Tiered,
}

/// Discover, layer by layer, every project needed to build `request.projects`.
///
/// A project reached in both tiers within the same layer is a conflict. It is
/// logged and tolerated when every conflicting project is builtin, otherwise
/// it aborts with [`DependsError::Conflict`]. Bug overrides in the override
/// files read along the way are applied to `store.graph`.
pub fn traverse_source(
    request: &SourceRequest,
    store: &mut GraphStore,
    locator: &dyn DependsFileLocator,
    builtins: &dyn BuiltinProjectSource,
    mut hook: Option<&mut dyn TraverseHook>,
) -> Result<SourceOutcome, DependsError> {
    let include_base = request.include_base;
    let mut seen = Tiered {
        curr: request
            .projects
            .iter()
            .chain(&request.basic_projects)
            .cloned()
            .collect(),
        base: BTreeSet::new(),
    };
    let mut reference_only = Tiered::default();
    let mut for_packaging = Tiered::default();
    let mut builtin_cache: Option<BTreeSet<String>> = None;

    let mut todo: BTreeSet<String> = request.projects.iter().cloned().collect();
    let mut layer = 0usize;

    while !todo.is_empty() {
        layer += 1;
        let mut pending = Tiered::default();

        for project in &todo {
            let conf_path = if is_variable_token(project) {
                None
            } else {
                locator.depends_file(project)
            };

            match conf_path {
                Some(path) => {
                    let conf = DependsConf::read(&path, &request.platform)?;
                    store.graph.apply_bug_overrides(&conf.bug, &path);

                    pending.curr.extend(conf.build.curr.iter().cloned());
                    pending.curr.extend(conf.packaging.curr.iter().cloned());
                    reference_only.curr.extend(conf.reference.curr);
                    for_packaging.curr.extend(conf.packaging.curr);
                    if include_base {
                        pending.base.extend(conf.build.base);
                        pending.base.extend(conf.packaging.base.iter().cloned());
                        reference_only.base.extend(conf.reference.base);
                        for_packaging.base.extend(conf.packaging.base);
                    }
                }
                None if include_base => {
                    if let Some(deps) = store.graph.get(project) {
                        pending.base.extend(deps.iter().cloned());
                    }
                }
                None => {}
            }
        }

        pending.retain_unseen(&seen);

        let conflict: Vec<String> = pending.curr.intersection(&pending.base).cloned().collect();
        if !conflict.is_empty() {
            if builtin_cache.is_none() {
                builtin_cache = Some(builtins.builtin_projects()?);
            }
            let tolerated = builtin_cache
                .as_ref()
                .is_some_and(|builtin| conflict.iter().all(|p| builtin.contains(p)));
            if !tolerated {
                return Err(DependsError::Conflict { projects: conflict });
            }
            info!("Conflict at {{{}}} ignored for builtin projects", conflict.join(","));
        }

        seen.absorb(&pending);
        debug!(
            layer,
            curr = pending.curr.len(),
            base = pending.base.len(),
            "Discovered dependency layer"
        );

        if let Some(hook) = hook.as_deref_mut() {
            hook.perform(&request.layer(&pending))
                .map_err(|source| DependsError::Hook { source })?;
        }

        todo = pending.curr.into_iter().chain(pending.base).collect();
    }

    if let Some(hook) = hook.as_deref_mut() {
        let mut leftover = Tiered {
            curr: reference_only.curr.difference(&seen.curr).cloned().collect(),
            base: reference_only.base.difference(&seen.base).cloned().collect(),
        };
        let tier = if seen.curr.contains(KERNEL_SENTINEL) {
            Some(&mut leftover.curr)
        } else if seen.base.contains(KERNEL_SENTINEL) {
            Some(&mut leftover.base)
        } else {
            None
        };
        if let Some(tier) = tier {
            match store.kernels.get(&request.platform) {
                Some(kernel) => {
                    tier.insert(kernel.clone());
                }
                None => warn!("Kernel projects not specified! Skip it."),
            }
        }
        debug!(
            curr = leftover.curr.len(),
            base = leftover.base.len(),
            "Reporting reference-only projects"
        );
        hook.perform(&request.layer(&leftover))
            .map_err(|source| DependsError::Hook { source })?;
    }

    for group in [&mut seen, &mut reference_only, &mut for_packaging] {
        replace_layer_variables(
            group,
            &request.platform,
            &store.variables,
            &store.kernels,
            include_base,
        );
    }

    Ok(SourceOutcome {
        seen,
        reference_only,
        for_packaging,
    })
}

/// Replace the kernel sentinel and every variable in both tiers of `group`.
///
/// The base tier is only touched when it takes part in the traversal.
fn replace_layer_variables(
    group: &mut Tiered,
    platform: &str,
    vars: &Variables,
    kernels: &KernelMap,
    include_base: bool,
) {
    if group.contains(KERNEL_SENTINEL) {
        let kernel: Vec<String> = if platform.is_empty() {
            kernels.values().cloned().collect()
        } else if let Some(kernel) = kernels.get(platform) {
            vec![kernel.clone()]
        } else {
            warn!("Kernel projects not specified! Skip it.");
            Vec::new()
        };
        replace_in_set(&mut group.curr, KERNEL_SENTINEL, &kernel);
        if include_base {
            replace_in_set(&mut group.base, KERNEL_SENTINEL, &kernel);
        }
    }

    for (var, expansion) in vars {
        replace_in_set(&mut group.curr, var, expansion);
        if include_base {
            replace_in_set(&mut group.base, var, expansion);
        }
    }
}

fn replace_in_set(set: &mut BTreeSet<String>, target: &str, replacement: &[String]) {
    if set.remove(target) {
        set.extend(replacement.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("layered.test.rs");
}
