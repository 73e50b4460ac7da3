//! Project dependency map
//!
//! Maps a project name to the ordered list of projects it depends on. A
//! project without dependencies is never stored: "absent" and "leaf" mean the
//! same thing to every traversal.

use petgraph::Direction;
use petgraph::graphmap::DiGraphMap;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Project -> direct build dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    entries: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct dependencies of `project`, or `None` for a leaf
    pub fn get(&self, project: &str) -> Option<&[String]> {
        self.entries.get(project).map(Vec::as_slice)
    }

    pub fn contains(&self, project: &str) -> bool {
        self.entries.contains_key(project)
    }

    /// Record `project`'s dependencies, returning the entry it replaced.
    ///
    /// An empty list removes the entry instead of storing it.
    pub fn insert(&mut self, project: impl Into<String>, deps: Vec<String>) -> Option<Vec<String>> {
        let project = project.into();
        if deps.is_empty() {
            return self.entries.remove(&project);
        }
        self.entries.insert(project, deps)
    }

    pub fn remove(&mut self, project: &str) -> Option<Vec<String>> {
        self.entries.remove(project)
    }

    /// Move an entry to a new key, overwriting whatever was there
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(deps) = self.entries.remove(from) {
            if self.entries.insert(to.to_string(), deps).is_some() {
                warn!("Dependency of {} is overwritten by renamed {}", to, from);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in project-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub(crate) fn lists_mut(&mut self) -> impl Iterator<Item = (&String, &mut Vec<String>)> {
        self.entries.iter_mut()
    }

    /// Apply `BuildDependent-Bug` entries from `source`.
    ///
    /// Each entry overwrites the target project's list; an empty list drops the
    /// target from the map.
    pub fn apply_bug_overrides(&mut self, overrides: &BTreeMap<String, Vec<String>>, source: &Path) {
        for (project, deps) in overrides {
            if self.contains(project) {
                warn!(
                    "Dependency of {} is overwritten by {}",
                    project,
                    source.display()
                );
            }
            self.insert(project.clone(), deps.clone());
        }
    }

    /// Edge view for closure walks.
    ///
    /// Edges run from dependency to dependent, so a project's dependencies are
    /// its incoming neighbors and its dependents are its outgoing neighbors.
    /// Repeated list entries collapse into a single edge.
    pub fn edge_view(&self) -> DiGraphMap<&str, ()> {
        let mut view = DiGraphMap::new();
        for (project, deps) in &self.entries {
            view.add_node(project.as_str());
            for dep in deps {
                view.add_edge(dep.as_str(), project.as_str(), ());
            }
        }
        debug!(
            nodes = view.node_count(),
            edges = view.edge_count(),
            "Built dependency edge view"
        );
        view
    }

    /// Direct dependencies within an edge view
    pub fn dependencies_in<'a>(view: &DiGraphMap<&'a str, ()>, project: &'a str) -> Vec<&'a str> {
        view.neighbors_directed(project, Direction::Incoming).collect()
    }

    /// Direct dependents within an edge view
    pub fn dependents_in<'a>(view: &DiGraphMap<&'a str, ()>, project: &'a str) -> Vec<&'a str> {
        view.neighbors_directed(project, Direction::Outgoing).collect()
    }
}

impl FromIterator<(String, Vec<String>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (project, deps) in iter {
            graph.insert(project, deps);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("graph.test.rs");
}
