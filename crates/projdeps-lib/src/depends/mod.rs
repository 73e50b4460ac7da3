//! # Dependency resolution core
//!
//! Builds the project dependency graph of a source tree and answers three
//! questions about it:
//!
//! - [`forward`] - in what order must these projects (and their prerequisites) be built?
//! - [`reverse`] - which projects depend on these ones?
//! - [`layered`] - which projects must be checked out, layer by layer, split
//!   into current-branch and base-branch tiers?
//!
//! Loading goes through [`parser`] -> [`conf`] / [`store`]; [`normalize`]
//! resolves variables, the kernel sentinel and virtual projects around the
//! traversals.

pub mod conf;
pub mod environment;
pub mod error;
pub mod forward;
pub mod graph;
pub mod layered;
pub mod normalize;
pub mod parser;
pub mod reverse;
pub mod source_tree;
pub mod store;

pub use conf::{DependsConf, TierLists};
pub use environment::{
    BaseEnvironment, BaseTargetResolver, BuiltinProjectSource, EnvConfigBuiltins,
};
pub use error::{DependsError, ErrorKind};
pub use graph::DependencyGraph;
pub use layered::{LayerConfig, SourceOutcome, SourceRequest, Tiered, TraverseHook, traverse_source};
pub use normalize::{collapse_virtual, reserve_kernel_projects, resolve_kernel_token, substitute_variables};
pub use parser::{ConfigDocument, SectionKind};
pub use source_tree::{DependsFileLocator, SourceTree};
pub use store::{GraphStore, KernelMap, Variables};

/// Separator between a project's base name and its virtual variant suffix
pub const VIRTUAL_PROJ_SEP: &str = "-virtual-";

/// Placeholder for "the platform's kernel project(s)", resolved last
pub const KERNEL_SENTINEL: &str = "${KernelProjs}";

/// Split `base-virtual-suffix` into (`base`, `-virtual-suffix`).
///
/// Non-virtual names return an empty suffix.
pub fn split_virtual(project: &str) -> (&str, &str) {
    match project.find(VIRTUAL_PROJ_SEP) {
        Some(idx) => project.split_at(idx),
        None => (project, ""),
    }
}

/// Unresolved variable references such as `${KernelProjs}`
pub fn is_variable_token(project: &str) -> bool {
    project.starts_with('$')
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("mod.test.rs");
}
