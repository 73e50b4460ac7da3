//! Property tests for the traversals over generated dependency graphs.
//!
//! Acyclic graphs only allow a project to depend on projects with a lower
//! index. Cyclic graphs are the same shape with one planted back-edge.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use proptest::sample::Index;

use projdeps_lib::depends::{
    DependencyGraph, DependsError, collapse_virtual, forward, reverse, split_virtual,
};

fn project(idx: usize) -> String {
    format!("p{idx}")
}

fn all_projects(n: usize) -> Vec<String> {
    (0..n).map(project).collect()
}

/// Dependency lists where project `i` only points below `i`
fn lower_index_lists(picks: &[Vec<Index>]) -> Vec<Vec<String>> {
    picks
        .iter()
        .enumerate()
        .map(|(i, picks)| {
            if i == 0 {
                Vec::new()
            } else {
                picks.iter().map(|ix| project(ix.index(i))).collect()
            }
        })
        .collect()
}

fn to_graph(lists: Vec<Vec<String>>) -> DependencyGraph {
    lists
        .into_iter()
        .enumerate()
        .map(|(i, deps)| (project(i), deps))
        .collect()
}

fn arb_picks(n: usize) -> impl Strategy<Value = Vec<Vec<Index>>> {
    prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), n)
}

fn arb_dag() -> impl Strategy<Value = (usize, DependencyGraph)> {
    (1usize..12)
        .prop_flat_map(|n| (Just(n), arb_picks(n)))
        .prop_map(|(n, picks)| (n, to_graph(lower_index_lists(&picks))))
}

fn arb_cyclic() -> impl Strategy<Value = (usize, DependencyGraph)> {
    (2usize..12)
        .prop_flat_map(|n| (Just(n), arb_picks(n), any::<Index>(), any::<Index>()))
        .prop_map(|(n, picks, lo, hi)| {
            let low = lo.index(n - 1);
            let high = low + 1 + hi.index(n - 1 - low);
            let mut lists = lower_index_lists(&picks);
            lists[high].push(project(low));
            lists[low].push(project(high));
            (n, to_graph(lists))
        })
}

fn arb_requested(n: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(any::<Index>(), 1..4)
        .prop_map(move |picks| picks.iter().map(|ix| project(ix.index(n))).collect())
}

fn arb_dag_with_request() -> impl Strategy<Value = (usize, DependencyGraph, Vec<String>)> {
    arb_dag().prop_flat_map(|(n, graph)| (Just(n), Just(graph), arb_requested(n)))
}

fn arb_cyclic_with_request() -> impl Strategy<Value = (usize, DependencyGraph, Vec<String>)> {
    arb_cyclic().prop_flat_map(|(n, graph)| (Just(n), Just(graph), arb_requested(n)))
}

fn arb_project_names() -> impl Strategy<Value = Vec<String>> {
    let name = (
        prop::sample::select(vec!["app", "libfoo", "tool"]),
        prop::sample::select(vec!["", "-virtual-lite", "-virtual-full"]),
    )
        .prop_map(|(base, suffix)| format!("{base}{suffix}"));
    prop::collection::vec(name, 0..10)
}

proptest! {
    #[test]
    fn order_puts_dependencies_first((_n, graph, requested) in arb_dag_with_request()) {
        let order = forward::order_dependencies(&requested, &graph).unwrap();

        let positions: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.as_str(), idx))
            .collect();
        prop_assert_eq!(positions.len(), order.len(), "duplicate in {:?}", order);

        for project in &requested {
            prop_assert!(positions.contains_key(project.as_str()));
        }
        for (idx, project) in order.iter().enumerate() {
            for dep in graph.get(project).unwrap_or_default() {
                let dep_idx = positions.get(dep.as_str()).copied();
                prop_assert!(
                    dep_idx.is_some_and(|d| d < idx),
                    "{} should precede {} in {:?}",
                    dep,
                    project,
                    order
                );
            }
        }
    }

    #[test]
    fn order_rejects_every_reachable_cycle((n, graph) in arb_cyclic()) {
        let err = forward::order_dependencies(&all_projects(n), &graph).unwrap_err();

        let DependsError::CircularDependency { chain } = err else {
            return Err(TestCaseError::fail("expected a circular dependency"));
        };
        prop_assert!(chain.len() >= 2);
        prop_assert_eq!(chain.first(), chain.last());
        for link in chain.windows(2) {
            let deps = graph.get(&link[0]).unwrap_or_default();
            prop_assert!(deps.contains(&link[1]), "{} does not depend on {}", link[0], link[1]);
        }
    }

    #[test]
    fn depth_set_settles_beyond_eccentricity((n, graph, requested) in arb_dag_with_request()) {
        let unlimited = forward::resolve_depth_set(&requested, &graph, 0);
        for depth in n..n + 3 {
            prop_assert_eq!(&forward::resolve_depth_set(&requested, &graph, depth), &unlimited);
        }
    }

    #[test]
    fn depth_set_settles_on_cyclic_graphs((n, graph, requested) in arb_cyclic_with_request()) {
        let unlimited = forward::resolve_depth_set(&requested, &graph, 0);
        prop_assert_eq!(forward::resolve_depth_set(&requested, &graph, n), unlimited);
    }

    #[test]
    fn expand_one_level_adds_direct_dependents((_n, graph, requested) in arb_dag_with_request()) {
        let mut expected: BTreeSet<String> = requested.iter().cloned().collect();
        for (project, deps) in graph.iter() {
            if deps.iter().any(|d| requested.contains(d)) {
                expected.insert(project.to_string());
            }
        }

        prop_assert_eq!(reverse::expand(&requested, &graph, 1), expected);
    }

    #[test]
    fn expand_unlimited_covers_one_level((_n, graph, requested) in arb_cyclic_with_request()) {
        let one = reverse::expand(&requested, &graph, 1);
        let all = reverse::expand(&requested, &graph, 0);
        prop_assert!(one.is_subset(&all));
    }

    #[test]
    fn collapse_virtual_is_idempotent(names in arb_project_names()) {
        let once = collapse_virtual(&names);
        prop_assert_eq!(collapse_virtual(&once), once.clone());

        let bases: BTreeSet<&str> = once.iter().map(|p| split_virtual(p).0).collect();
        prop_assert_eq!(bases.len(), once.len());

        let mut rest = names.iter();
        for kept in &once {
            prop_assert!(rest.any(|p| p == kept), "{} out of input order", kept);
        }
    }
}
