//! Dependency graph assembly
//!
//! The store starts from the base `project.depends` file (variables, global
//! dependency map, kernel map) and then folds in every per-project override
//! file found in the source tree. Later writes for the same project replace
//! earlier ones.

use super::conf::DependsConf;
use super::error::DependsError;
use super::graph::DependencyGraph;
use super::parser::{ConfigDocument, SectionKind};
use super::source_tree::SourceTree;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Variable name -> expansion (one or more project names)
pub type Variables = BTreeMap<String, Vec<String>>;

/// Platform -> kernel project name
pub type KernelMap = BTreeMap<String, String>;

/// Everything loaded from the dependency configuration of one source tree
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    pub variables: Variables,
    pub graph: DependencyGraph,
    pub kernels: KernelMap,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the base config file. A missing file yields an empty store.
    pub fn load_base(path: &Path) -> Result<Self, DependsError> {
        if !path.is_file() {
            debug!("No base dependency config at {}", path.display());
            return Ok(Self::new());
        }
        let doc = ConfigDocument::read(path)?;
        Self::from_base_document(&doc)
    }

    pub fn from_base_document(doc: &ConfigDocument) -> Result<Self, DependsError> {
        let mut store = Self::new();

        for section in doc.sections() {
            let Some(kind) = SectionKind::from_name(&section.header.raw) else {
                continue;
            };
            if !SectionKind::BASE.contains(&kind) {
                continue;
            }

            for (key, values) in doc.key_values(section)? {
                // Entries without values carry nothing worth tracking
                let Some(first) = values.first().cloned() else {
                    continue;
                };
                match kind {
                    SectionKind::Variables => {
                        store.variables.insert(key, values);
                    }
                    SectionKind::Dependency => {
                        store.graph.insert(key, values);
                    }
                    SectionKind::Kernel => {
                        store.kernels.insert(key, first);
                    }
                    _ => {}
                }
            }
        }

        debug!(
            variables = store.variables.len(),
            projects = store.graph.len(),
            kernels = store.kernels.len(),
            "Loaded base dependency config from {}",
            doc.path().display()
        );
        Ok(store)
    }

    /// Fold one project's parsed override file into the graph.
    ///
    /// The project's build dependencies (base tier, then current tier) replace
    /// its entry, and each bug override replaces or drops its own target.
    pub fn merge_override(&mut self, project: &str, conf: &DependsConf, source: &Path) {
        if self.graph.contains(project) {
            warn!(
                "Dependency of {} is overwritten by {}",
                project,
                source.display()
            );
        }
        self.graph.insert(project, conf.build_dependencies());
        self.graph.apply_bug_overrides(&conf.bug, source);
    }

    /// Parse the override file at `path` for `platform` and merge it under `project`
    pub fn merge_override_file(
        &mut self,
        project: &str,
        path: &Path,
        platform: &str,
    ) -> Result<(), DependsError> {
        let conf = DependsConf::read(path, platform)?;
        self.merge_override(project, &conf, path);
        Ok(())
    }

    /// Load the base config, then every override file in `tree`
    pub fn load(tree: &SourceTree, base_config: &Path, platform: &str) -> Result<Self, DependsError> {
        let mut store = Self::load_base(base_config)?;
        for (project, path) in tree.depends_files()? {
            store.merge_override_file(&project, &path, platform)?;
        }
        debug!(
            projects = store.graph.len(),
            platform = %platform,
            "Dependency graph assembled"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("store.test.rs");
}
