// Tests for normalization passes

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn graph(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(project, deps)| (project.to_string(), strings(deps)))
        .collect()
}

fn kernels() -> KernelMap {
    KernelMap::from([
        ("armv7".to_string(), "kernelA".to_string()),
        ("x64".to_string(), "kernelB".to_string()),
        ("x86".to_string(), "kernelB".to_string()),
    ])
}

// ============================================================================
// Variable substitution
// ============================================================================

#[test]
fn test_variable_in_list_is_expanded() {
    let mut graph = graph(&[("A", &["X"])]);
    let vars = Variables::from([("X".to_string(), strings(&["P1", "P2"]))]);

    substitute_variables(&mut graph, &vars).unwrap();

    assert_eq!(graph.get("A"), Some(&strings(&["P1", "P2"])[..]));
}

#[test]
fn test_variable_expansion_keeps_position() {
    let mut graph = graph(&[("A", &["first", "X", "last", "X"])]);
    let vars = Variables::from([("X".to_string(), strings(&["P1", "P2"]))]);

    substitute_variables(&mut graph, &vars).unwrap();

    assert_eq!(graph.get("A"), Some(&strings(&["first", "P1", "P2", "last"])[..]));
}

#[test]
fn test_variable_named_key_is_renamed() {
    let mut graph = graph(&[("PlatformLib", &["libc"])]);
    let vars = Variables::from([("PlatformLib".to_string(), strings(&["libplatform-x64"]))]);

    substitute_variables(&mut graph, &vars).unwrap();

    assert!(!graph.contains("PlatformLib"));
    assert_eq!(graph.get("libplatform-x64"), Some(&strings(&["libc"])[..]));
}

#[test]
fn test_variable_named_key_with_multi_value_expansion_is_rejected() {
    let mut graph = graph(&[("Libs", &["libc"])]);
    let vars = Variables::from([("Libs".to_string(), strings(&["liba", "libb"]))]);

    let err = substitute_variables(&mut graph, &vars).unwrap_err();

    assert!(matches!(err, DependsError::AmbiguousRename { .. }));
}

#[test]
fn test_nested_variable_is_expanded_regardless_of_name_order() {
    let mut graph = graph(&[("app", &["ZLibs"])]);
    let vars = Variables::from([
        ("CryptoLibs".to_string(), strings(&["libssl", "libcrypto"])),
        ("ZLibs".to_string(), strings(&["CryptoLibs", "libz"])),
    ]);

    substitute_variables(&mut graph, &vars).unwrap();

    assert_eq!(
        graph.get("app"),
        Some(&strings(&["libssl", "libcrypto", "libz"])[..])
    );
}

#[test]
fn test_variable_chain_longer_than_one_level() {
    let mut graph = graph(&[("app", &["A", "libc"])]);
    let vars = Variables::from([
        ("A".to_string(), strings(&["B"])),
        ("B".to_string(), strings(&["C"])),
        ("C".to_string(), strings(&["libfinal"])),
    ]);

    substitute_variables(&mut graph, &vars).unwrap();

    assert_eq!(graph.get("app"), Some(&strings(&["libfinal", "libc"])[..]));
}

#[test]
fn test_self_referencing_variable_is_rejected() {
    let mut graph = graph(&[("app", &["Loop"])]);
    let vars = Variables::from([("Loop".to_string(), strings(&["Loop", "libz"]))]);

    let err = substitute_variables(&mut graph, &vars).unwrap_err();

    assert!(matches!(err, DependsError::RecursiveVariable { ref variable } if variable == "Loop"));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn test_mutually_recursive_variables_are_rejected() {
    let mut graph = graph(&[("app", &["Ping"])]);
    let vars = Variables::from([
        ("Ping".to_string(), strings(&["Pong"])),
        ("Pong".to_string(), strings(&["Ping"])),
    ]);

    let err = substitute_variables(&mut graph, &vars).unwrap_err();

    assert!(matches!(err, DependsError::RecursiveVariable { .. }));
}

#[test]
fn test_kernel_sentinel_is_left_for_later() {
    let mut graph = graph(&[("A", &[KERNEL_SENTINEL, "libc"])]);
    let vars = Variables::from([("X".to_string(), strings(&["P1"]))]);

    substitute_variables(&mut graph, &vars).unwrap();

    assert_eq!(graph.get("A"), Some(&strings(&[KERNEL_SENTINEL, "libc"])[..]));
}

// ============================================================================
// Kernel sentinel
// ============================================================================

#[test]
fn test_sentinel_without_platform_resolves_all_kernels() {
    let resolved = resolve_kernel_token(
        strings(&["libc", KERNEL_SENTINEL]),
        &kernels(),
        &[],
        &BTreeSet::new(),
    )
    .unwrap();

    assert_eq!(resolved, strings(&["libc", "kernelA", "kernelB"]));
}

#[test]
fn test_sentinel_with_platforms_resolves_their_kernels() {
    let resolved = resolve_kernel_token(
        strings(&[KERNEL_SENTINEL, "app"]),
        &kernels(),
        &strings(&["x64", "x86"]),
        &BTreeSet::new(),
    )
    .unwrap();

    assert_eq!(resolved, strings(&["kernelB", "app"]));
}

#[test]
fn test_sentinel_for_unmapped_platform_is_error() {
    let err = resolve_kernel_token(
        strings(&[KERNEL_SENTINEL]),
        &kernels(),
        &strings(&["ppc"]),
        &BTreeSet::new(),
    )
    .unwrap_err();

    assert!(matches!(err, DependsError::KernelNotFound { ref platform } if platform == "ppc"));
}

#[test]
fn test_sentinel_narrowed_to_reserved_kernels() {
    let reserved = BTreeSet::from(["kernelB".to_string()]);
    let resolved =
        resolve_kernel_token(strings(&[KERNEL_SENTINEL]), &kernels(), &[], &reserved).unwrap();

    assert_eq!(resolved, strings(&["kernelB"]));
}

#[test]
fn test_list_without_sentinel_is_untouched() {
    let resolved =
        resolve_kernel_token(strings(&["b", "a"]), &kernels(), &strings(&["ppc"]), &BTreeSet::new())
            .unwrap();
    assert_eq!(resolved, strings(&["b", "a"]));
}

#[test]
fn test_reserve_kernel_projects_swaps_in_sentinel() {
    let mut requested = strings(&["app", "kernelA", "libc"]);
    let reserved = reserve_kernel_projects(&mut requested, &kernels());

    assert_eq!(requested, strings(&["app", KERNEL_SENTINEL, "libc"]));
    assert_eq!(reserved, BTreeSet::from(["kernelA".to_string()]));
}

#[test]
fn test_reserve_kernel_projects_keeps_first_kernel_position() {
    let mut requested = strings(&["kernelB", "drivers", "kernelA"]);
    let reserved = reserve_kernel_projects(&mut requested, &kernels());

    assert_eq!(requested, strings(&[KERNEL_SENTINEL, "drivers"]));
    assert_eq!(reserved, BTreeSet::from(["kernelA".to_string(), "kernelB".to_string()]));
}

#[test]
fn test_reserve_kernel_projects_without_kernels_is_noop() {
    let mut requested = strings(&["app"]);
    let reserved = reserve_kernel_projects(&mut requested, &kernels());

    assert!(reserved.is_empty());
    assert_eq!(requested, strings(&["app"]));
}

// ============================================================================
// Virtual projects
// ============================================================================

#[test]
fn test_collapse_virtual_keeps_first_variant_per_base() {
    let collapsed = collapse_virtual(["app-virtual-lite", "libc", "app", "app-virtual-full"]);
    assert_eq!(collapsed, strings(&["app-virtual-lite", "libc"]));
}

#[test]
fn test_collapse_virtual_is_idempotent() {
    let input = ["b-virtual-1", "a", "b", "a-virtual-x", "c"];
    let once = collapse_virtual(input);
    let twice = collapse_virtual(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_base_name() {
    assert_eq!(base_name("app-virtual-lite"), "app");
    assert_eq!(base_name("app"), "app");
}
