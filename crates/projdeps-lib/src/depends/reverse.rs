//! Reverse traversal: which projects depend on the requested ones

use super::graph::DependencyGraph;
use std::collections::BTreeSet;
use tracing::debug;

/// Requested projects plus every project depending on them, up to
/// `max_depth` layers of dependents (`0` = unlimited).
///
/// The result is the closure set; its order carries no meaning.
pub fn expand<'a>(
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
            if !view.contains_node(*project) {
                continue;
            }
            for dependent in DependencyGraph::dependents_in(&view, *project) {
                if !keep.contains(dependent) {
                    next.insert(dependent);
                }
            }
        }
        keep.extend(&next);
        todo = next;
        depth += 1;
    }

    debug!(depth, dependents = keep.len(), "Resolved reverse closure");
    keep.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("reverse.test.rs");
}
