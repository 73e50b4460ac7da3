// Tests for forward traversal

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn graph(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(project, deps)| (project.to_string(), strings(deps)))
        .collect()
}

/// Every project must appear after each of its direct dependencies
fn assert_dependencies_precede(order: &[String], graph: &DependencyGraph) {
    for (idx, project) in order.iter().enumerate() {
        for dep in graph.get(project).unwrap_or_default() {
            let dep_idx = order
                .iter()
                .position(|p| p == dep)
                .unwrap_or_else(|| panic!("{dep} missing from order {order:?}"));
            assert!(
                dep_idx < idx,
                "{dep} should precede {project} in {order:?}"
            );
        }
    }
}

fn diamond() -> DependencyGraph {
    graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"])])
}

// ============================================================================
// Depth-limited closure
// ============================================================================

#[test]
fn test_depth_set_unlimited_reaches_fixpoint() {
    let set = resolve_depth_set(&strings(&["A"]), &diamond(), 0);
    assert_eq!(set, BTreeSet::from(["A", "B", "C", "D"].map(String::from)));
}

#[test]
fn test_depth_set_one_layer() {
    let set = resolve_depth_set(&strings(&["A"]), &diamond(), 1);
    assert_eq!(set, BTreeSet::from(["A", "B", "C"].map(String::from)));
}

#[test]
fn test_depth_set_matches_unlimited_beyond_eccentricity() {
    let graph = diamond();
    let requested = strings(&["A"]);
    let unlimited = resolve_depth_set(&requested, &graph, 0);
    for depth in 2..6 {
        assert_eq!(resolve_depth_set(&requested, &graph, depth), unlimited);
    }
}

#[test]
fn test_depth_set_of_unknown_project_is_itself() {
    let set = resolve_depth_set(&strings(&["ghost"]), &diamond(), 0);
    assert_eq!(set, BTreeSet::from(["ghost".to_string()]));
}

#[test]
fn test_depth_set_terminates_on_cycles() {
    let graph = graph(&[("A", &["B"]), ("B", &["A"])]);
    let set = resolve_depth_set(&strings(&["A"]), &graph, 0);
    assert_eq!(set, BTreeSet::from(["A", "B"].map(String::from)));
}

// ============================================================================
// Dependency ordering
// ============================================================================

#[test]
fn test_order_diamond() {
    let graph = diamond();
    let order = order_dependencies(&strings(&["A"]), &graph).unwrap();

    assert_eq!(order, strings(&["D", "B", "C", "A"]));
    assert_dependencies_precede(&order, &graph);
}

#[test]
fn test_order_treats_missing_entries_as_leaves() {
    let graph = graph(&[("app", &["libfoo"])]);
    let order = order_dependencies(&strings(&["ghost", "app"]), &graph).unwrap();
    assert_eq!(order, strings(&["ghost", "libfoo", "app"]));
}

#[test]
fn test_order_ignores_duplicate_list_entries() {
    let graph = graph(&[("app", &["libfoo", "libfoo", "libc"]), ("libfoo", &["libc"])]);
    let order = order_dependencies(&strings(&["app"]), &graph).unwrap();
    assert_eq!(order, strings(&["libc", "libfoo", "app"]));
}

#[test]
fn test_order_shared_prerequisites_emitted_once() {
    let graph = graph(&[
        ("app1", &["libfoo", "libc"]),
        ("app2", &["libbar", "libfoo"]),
        ("libfoo", &["libc"]),
        ("libbar", &["libc"]),
    ]);
    let order = order_dependencies(&strings(&["app2", "app1", "app2"]), &graph).unwrap();

    assert_eq!(order, strings(&["libc", "libbar", "libfoo", "app2", "app1"]));
    assert_dependencies_precede(&order, &graph);
}

#[test]
fn test_order_deep_chain() {
    let graph = graph(&[
        ("p0", &["p1"]),
        ("p1", &["p2"]),
        ("p2", &["p3"]),
        ("p3", &["p4"]),
    ]);
    let order = order_dependencies(&strings(&["p0"]), &graph).unwrap();
    assert_eq!(order, strings(&["p4", "p3", "p2", "p1", "p0"]));
}

#[test]
fn test_two_node_cycle_reports_chain() {
    let graph = graph(&[("A", &["B"]), ("B", &["A"])]);
    let err = order_dependencies(&strings(&["A"]), &graph).unwrap_err();

    match err {
        DependsError::CircularDependency { chain } => {
            assert_eq!(chain, strings(&["A", "B", "A"]));
        }
        other => panic!("expected circular dependency, got {other:?}"),
    }
}

#[test]
fn test_cycle_below_acyclic_prefix_reports_only_the_loop() {
    let graph = graph(&[
        ("app", &["libfoo"]),
        ("libfoo", &["libbar"]),
        ("libbar", &["libbaz"]),
        ("libbaz", &["libfoo"]),
    ]);
    let err = order_dependencies(&strings(&["app"]), &graph).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Circular dependency: libfoo->libbar->libbaz->libfoo"
    );
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let graph = graph(&[("A", &["A"])]);
    let err = order_dependencies(&strings(&["A"]), &graph).unwrap_err();
    assert!(matches!(err, DependsError::CircularDependency { ref chain } if chain.len() == 2));
}

#[test]
fn test_unreachable_cycle_does_not_fail() {
    let graph = graph(&[("app", &["libc"]), ("X", &["Y"]), ("Y", &["X"])]);
    let order = order_dependencies(&strings(&["app"]), &graph).unwrap();
    assert_eq!(order, strings(&["libc", "app"]));
}

// ============================================================================
// Traverse and reorder
// ============================================================================

#[test]
fn test_traverse_unlimited_equals_full_order() {
    let graph = diamond();
    let requested = strings(&["A"]);
    assert_eq!(
        traverse(&requested, &graph, 0).unwrap(),
        order_dependencies(&requested, &graph).unwrap()
    );
}

#[test]
fn test_traverse_depth_filters_but_keeps_order() {
    let graph = diamond();
    let order = traverse(&strings(&["A"]), &graph, 1).unwrap();
    assert_eq!(order, strings(&["B", "C", "A"]));
}

#[test]
fn test_traverse_cycle_is_fatal_even_with_depth_limit() {
    let graph = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
    assert!(traverse(&strings(&["A"]), &graph, 1).is_err());
}

#[test]
fn test_reorder_keeps_only_requested() {
    let graph = diamond();
    let order = reorder(&strings(&["A", "D"]), &graph).unwrap();
    assert_eq!(order, strings(&["D", "A"]));
}
