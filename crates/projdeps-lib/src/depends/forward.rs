//! Forward traversal: build order for requested projects
//!
//! [`order_dependencies`] emits every project reachable from the request after
//! all of its dependencies (depth-first, post-order) and aborts on the first
//! cycle. [`resolve_depth_set`] computes the breadth-first closure up to a
//! depth, which [`traverse`] uses to prune the ordering.

use super::error::DependsError;
use super::graph::DependencyGraph;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Projects reachable from `requested` within `max_depth` layers.
///
/// The requested projects are layer 0. `max_depth == 0` expands to fixpoint.
pub fn resolve_depth_set<'a>(
    requested: &'a [String],
    graph: &'a DependencyGraph,
    max_depth: usize,
) -> BTreeSet<String> {
    let view = graph.edge_view();
    let mut keep: BTreeSet<&str> = requested.iter().map(String::as_str).collect();
    let mut todo = keep.clone();
    let mut depth = 0;

    while !todo.is_empty() && (max_depth == 0 || depth < max_depth) {
        let mut next = BTreeSet::new();
        for project in &todo {
            for dep in DependencyGraph::dependencies_in(&view, *project) {
                if !keep.contains(dep) {
                    next.insert(dep);
                }
            }
        }
        keep.extend(&next);
        todo = next;
        depth += 1;
    }

    debug!(depth, reachable = keep.len(), "Resolved forward closure");
    keep.into_iter().map(str::to_string).collect()
}

/// Depth-first walk state for [`order_dependencies`]
struct OrderWalk<'a> {
    graph: &'a DependencyGraph,
    seen: HashSet<&'a str>,
    emitted: HashSet<&'a str>,
    stack: Vec<&'a str>,
    result: Vec<&'a str>,
}

impl<'a> OrderWalk<'a> {
    fn emit(&mut self, project: &'a str) {
        self.emitted.insert(project);
        self.result.push(project);
    }

    /// Visit `head`, returning the cycle chain if one closes below it
    fn visit(&mut self, head: &'a str) -> Result<(), Vec<String>> {
        let graph = self.graph;
        self.seen.insert(head);
        let Some(deps) = graph.get(head) else {
            self.emit(head);
            return Ok(());
        };

        self.stack.push(head);
        for dep in deps {
            let dep = dep.as_str();
            if !self.seen.contains(dep) {
                self.visit(dep)?;
            } else if !self.emitted.contains(dep) {
                // Seen but not emitted means `dep` is still on the stack
                let start = self.stack.iter().position(|p| *p == dep).unwrap_or(0);
                let mut chain: Vec<String> =
                    self.stack[start..].iter().map(|p| p.to_string()).collect();
                chain.push(dep.to_string());
                return Err(chain);
            }
        }
        self.stack.pop();
        self.emit(head);
        Ok(())
    }
}

/// Order `requested` and everything they depend on so that each project
/// follows all of its dependencies.
///
/// Projects without a graph entry are leaves. A dependency cycle reachable
/// from the request aborts with [`DependsError::CircularDependency`].
pub fn order_dependencies<'a>(
    requested: &'a [String],
    graph: &'a DependencyGraph,
) -> Result<Vec<String>, DependsError> {
    let mut walk = OrderWalk {
        graph,
        seen: HashSet::new(),
        emitted: HashSet::new(),
        stack: Vec::new(),
        result: Vec::new(),
    };

    for project in requested {
        if walk.emitted.contains(project.as_str()) {
            continue;
        }
        walk.visit(project)
            .map_err(|chain| DependsError::CircularDependency { chain })?;
    }

    Ok(walk.result.into_iter().map(str::to_string).collect())
}

/// Build order for `requested` plus prerequisites up to `max_depth` layers
/// (`0` = unlimited)
pub fn traverse<'a>(
    requested: &'a [String],
    graph: &'a DependencyGraph,
    max_depth: usize,
) -> Result<Vec<String>, DependsError> {
    let mut ordered = order_dependencies(requested, graph)?;
    if max_depth != 0 {
        let keep = resolve_depth_set(requested, graph, max_depth);
        ordered.retain(|p| keep.contains(p));
    }
    Ok(ordered)
}

/// Re-order only the requested projects by their dependencies
pub fn reorder<'a>(
    requested: &'a [String],
    graph: &'a DependencyGraph,
) -> Result<Vec<String>, DependsError> {
    let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
    let mut ordered = order_dependencies(requested, graph)?;
    ordered.retain(|p| wanted.contains(p.as_str()));
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("forward.test.rs");
}
