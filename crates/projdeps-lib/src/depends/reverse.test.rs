// Tests for reverse traversal

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

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn layered() -> DependencyGraph {
    graph(&[
        ("libfoo", &["libc"]),
        ("libbar", &["libc", "libfoo"]),
        ("app", &["libbar"]),
        ("tool", &["libfoo"]),
        ("standalone", &["libz"]),
    ])
}

#[test]
fn test_expand_one_layer_adds_direct_dependents() {
    let result = expand(&["libc".to_string()], &layered(), 1);
    assert_eq!(result, set(&["libc", "libfoo", "libbar"]));
}

#[test]
fn test_expand_unlimited_is_full_closure() {
    let result = expand(&["libc".to_string()], &layered(), 0);
    assert_eq!(result, set(&["libc", "libfoo", "libbar", "app", "tool"]));
}

#[test]
fn test_expand_stops_at_fixpoint() {
    let graph = layered();
    let requested = vec!["libfoo".to_string()];
    let unlimited = expand(&requested, &graph, 0);
    assert_eq!(expand(&requested, &graph, 10), unlimited);
    assert_eq!(unlimited, set(&["libfoo", "libbar", "app", "tool"]));
}

#[test]
fn test_expand_unknown_project_is_itself() {
    let result = expand(&["ghost".to_string()], &layered(), 0);
    assert_eq!(result, set(&["ghost"]));
}

#[test]
fn test_expand_terminates_on_cycles() {
    let graph = graph(&[("A", &["B"]), ("B", &["A"]), ("C", &["A"])]);
    let result = expand(&["A".to_string()], &graph, 0);
    assert_eq!(result, set(&["A", "B", "C"]));
}
