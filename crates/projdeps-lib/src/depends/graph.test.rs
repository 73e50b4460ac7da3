// Tests for the dependency map

fn graph(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(project, deps)| {
            (
                project.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_new_graph_is_empty() {
    let graph = DependencyGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.len(), 0);
    assert!(graph.get("anything").is_none());
}

#[test]
fn test_insert_empty_list_keeps_project_absent() {
    let mut graph = DependencyGraph::new();
    graph.insert("libfoo", Vec::new());
    assert!(!graph.contains("libfoo"));
}

#[test]
fn test_insert_empty_list_removes_existing_entry() {
    let mut graph = graph(&[("libfoo", &["libc"])]);
    let previous = graph.insert("libfoo", Vec::new());
    assert_eq!(previous, Some(vec!["libc".to_string()]));
    assert!(!graph.contains("libfoo"));
}

#[test]
fn test_rename_moves_entry() {
    let mut graph = graph(&[("old", &["libc"])]);
    graph.rename("old", "new");
    assert!(!graph.contains("old"));
    assert_eq!(graph.get("new"), Some(&["libc".to_string()][..]));
}

#[test]
fn test_bug_overrides_overwrite_and_delete() {
    let mut graph = graph(&[("libbroken", &["libold"]), ("libobsolete", &["libc"])]);
    let overrides = BTreeMap::from([
        ("libbroken".to_string(), vec!["libfixed".to_string()]),
        ("libobsolete".to_string(), Vec::new()),
        ("libnew".to_string(), vec!["libc".to_string()]),
    ]);

    graph.apply_bug_overrides(&overrides, Path::new("source/app/SynoBuildConf/depends"));

    assert_eq!(graph.get("libbroken"), Some(&["libfixed".to_string()][..]));
    assert!(!graph.contains("libobsolete"));
    assert_eq!(graph.get("libnew"), Some(&["libc".to_string()][..]));
}

#[test]
fn test_bug_override_deleting_absent_project_is_harmless() {
    let mut graph = DependencyGraph::new();
    let overrides = BTreeMap::from([("ghost".to_string(), Vec::new())]);
    graph.apply_bug_overrides(&overrides, Path::new("depends"));
    assert!(graph.is_empty());
}

#[test]
fn test_edge_view_directions() {
    let graph = graph(&[("app", &["libfoo", "libbar", "libfoo"]), ("libfoo", &["libc"])]);
    let view = graph.edge_view();

    let mut deps = DependencyGraph::dependencies_in(&view, "app");
    deps.sort_unstable();
    assert_eq!(deps, vec!["libbar", "libfoo"]);

    assert_eq!(DependencyGraph::dependents_in(&view, "libc"), vec!["libfoo"]);
    assert!(DependencyGraph::dependencies_in(&view, "libc").is_empty());
    assert!(DependencyGraph::dependencies_in(&view, "not-there").is_empty());
}
