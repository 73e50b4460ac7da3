// Tests for layered source traversal

use crate::depends::SourceTree;
use crate::testing::SourceTreeFixture;

const BASE_CONFIG: &str = r#"
[variables]
CoreLibs = "libc libssl"

[project dependency]
libbase = "libc"
libshared = "libc"

[platform kernel]
x64 = "linux-4.4"
armv7 = "linux-3.10"
"#;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn request(projects: &[&str], platform: &str) -> SourceRequest {
    SourceRequest::new(projects.iter().map(|p| p.to_string()).collect(), platform)
        .with_base_target("7.0")
}

struct Run {
    result: Result<SourceOutcome, DependsError>,
    layers: Vec<LayerConfig>,
    store: GraphStore,
}

fn run(tree: &SourceTree, request: &SourceRequest, builtins: &BTreeSet<String>) -> Run {
    let mut store = GraphStore::load_base(&tree.base_config()).unwrap();
    let mut layers: Vec<LayerConfig> = Vec::new();
    let mut record = |layer: &LayerConfig| -> anyhow::Result<()> {
        layers.push(layer.clone());
        Ok(())
    };
    let result = traverse_source(request, &mut store, tree, builtins, Some(&mut record));
    Run {
        result,
        layers,
        store,
    }
}

fn fixture() -> SourceTreeFixture {
    SourceTreeFixture::new()
        .unwrap()
        .with_base_config(BASE_CONFIG)
        .unwrap()
}

// ============================================================================
// Current tier
// ============================================================================

#[test]
fn test_layers_follow_build_dependencies() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nlibfoo\n")
        .unwrap()
        .with_depends("libfoo", "[BuildDependent]\nlibc\n")
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "x64"), &BTreeSet::new());
    let outcome = run.result.unwrap();

    let curr_layers: Vec<BTreeSet<String>> =
        run.layers.iter().map(|l| l.curr_projects.clone()).collect();
    assert_eq!(
        curr_layers,
        vec![set(&["libfoo"]), set(&["libc"]), set(&[]), set(&[])]
    );
    assert!(run.layers.iter().all(|l| l.base_target == "7.0" && !l.include_base));
    assert_eq!(
        outcome.seen.curr,
        set(&["app", "libfoo", "libc", "uistring", "synopkgutils"])
    );
    assert!(outcome.seen.base.is_empty());
}

#[test]
fn test_shared_dependency_reported_once() {
    let fixture = fixture()
        .with_depends("app1", "[BuildDependent]\nlibfoo\n")
        .unwrap()
        .with_depends("app2", "[BuildDependent]\nlibfoo\napp1\n")
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app1", "app2"], "x64"), &BTreeSet::new());
    run.result.unwrap();

    assert_eq!(run.layers[0].curr_projects, set(&["libfoo"]));
    let reported = run
        .layers
        .iter()
        .filter(|l| l.curr_projects.contains("libfoo"))
        .count();
    assert_eq!(reported, 1);
}

#[test]
fn test_basic_projects_are_never_reported() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nuistring\nlibfoo\n")
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "x64"), &BTreeSet::new());
    run.result.unwrap();

    assert_eq!(run.layers[0].curr_projects, set(&["libfoo"]));
}

#[test]
fn test_platform_tagged_section_is_selected() {
    let fixture = fixture()
        .with_depends(
            "app",
            "[BuildDependent]\nlibgeneric\n[BuildDependent:x64,x86]\nlibsimd\n",
        )
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "x64"), &BTreeSet::new());

    assert!(run.result.unwrap().seen.curr.contains("libsimd"));
    assert_eq!(run.layers[0].curr_projects, set(&["libsimd"]));
}

#[test]
fn test_reference_and_packaging_lists() {
    let fixture = fixture()
        .with_depends(
            "app",
            "[BuildDependent]\nlibfoo\n[ReferenceOnly]\nlibref\nlibfoo\n[PackagePacking]\npkgtool\n",
        )
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "x64"), &BTreeSet::new());
    let outcome = run.result.unwrap();

    assert_eq!(run.layers[0].curr_projects, set(&["libfoo", "pkgtool"]));
    assert_eq!(outcome.reference_only.curr, set(&["libref", "libfoo"]));
    assert_eq!(outcome.for_packaging.curr, set(&["pkgtool"]));

    // Last report carries reference-only projects nobody builds
    let last = run.layers.last().unwrap();
    assert_eq!(last.curr_projects, set(&["libref"]));
}

// ============================================================================
// Base tier
// ============================================================================

#[test]
fn test_base_tier_ignored_without_include_base() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent-Tag]\nlibbase\n")
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "x64"), &BTreeSet::new());

    assert!(run.result.unwrap().seen.base.is_empty());
}

#[test]
fn test_base_tier_follows_graph_for_unconfigured_projects() {
    let fixture = fixture()
        .with_depends(
            "app",
            "[BuildDependent-Tag]\nlibbase\n[PackagePacking-Tag]\npkgbase\n",
        )
        .unwrap();
    let request = request(&["app"], "x64").with_include_base(true);

    let run = run(&fixture.tree(), &request, &BTreeSet::new());
    let outcome = run.result.unwrap();

    assert_eq!(run.layers[0].base_projects, set(&["libbase", "pkgbase"]));
    assert_eq!(run.layers[1].base_projects, set(&["libc"]));
    assert!(run.layers.iter().all(|l| l.include_base));
    assert_eq!(outcome.seen.base, set(&["libbase", "pkgbase", "libc"]));
    assert_eq!(outcome.for_packaging.base, set(&["pkgbase"]));
    assert!(outcome.for_packaging.curr.is_empty());
}

#[test]
fn test_conflict_on_non_builtin_project_is_fatal() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nlibc\n[BuildDependent-Tag]\nlibc\n")
        .unwrap();
    let request = request(&["app"], "x64").with_include_base(true);

    let run = run(&fixture.tree(), &request, &BTreeSet::new());

    match run.result.unwrap_err() {
        DependsError::Conflict { projects } => assert_eq!(projects, vec!["libc".to_string()]),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(run.layers.is_empty());
}

#[test]
fn test_conflict_on_builtin_project_is_tolerated() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nlibc\n[BuildDependent-Tag]\nlibc\n")
        .unwrap();
    let request = request(&["app"], "x64").with_include_base(true);

    let run = run(&fixture.tree(), &request, &set(&["libc"]));
    let outcome = run.result.unwrap();

    assert!(outcome.seen.curr.contains("libc"));
    assert!(outcome.seen.base.contains("libc"));
}

#[test]
fn test_builtins_read_from_env_config_on_conflict() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nlibc\n[BuildDependent-Tag]\nlibc\n")
        .unwrap()
        .with_builtin_projects(&["libc", "busybox"])
        .unwrap();
    let tree = fixture.tree();
    let builtins = crate::depends::EnvConfigBuiltins::new(tree.env_config());
    let mut store = GraphStore::load_base(&tree.base_config()).unwrap();
    let request = request(&["app"], "x64").with_include_base(true);

    let outcome = traverse_source(&request, &mut store, &tree, &builtins, None).unwrap();

    assert!(outcome.seen.base.contains("libc"));
}

// ============================================================================
// Overrides, variables, hooks
// ============================================================================

#[test]
fn test_bug_overrides_update_shared_graph() {
    let fixture = fixture()
        .with_depends(
            "app",
            "[BuildDependent]\nlibfoo\n[BuildDependent-Bug]\nlibshared = \"libfixed\"\nlibbase = \"\"\n",
        )
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "x64"), &BTreeSet::new());
    run.result.unwrap();

    assert_eq!(
        run.store.graph.get("libshared"),
        Some(&["libfixed".to_string()][..])
    );
    assert!(!run.store.graph.contains("libbase"));
}

#[test]
fn test_variables_and_kernel_replaced_in_results() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nCoreLibs\n${KernelProjs}\n")
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "x64"), &BTreeSet::new());
    let outcome = run.result.unwrap();

    assert!(outcome.seen.curr.is_superset(&set(&["libc", "libssl", "linux-4.4"])));
    assert!(!outcome.seen.curr.contains("CoreLibs"));
    assert!(!outcome.seen.curr.contains(KERNEL_SENTINEL));
    assert!(run.layers.last().unwrap().curr_projects.contains("linux-4.4"));
}

#[test]
fn test_kernel_for_unmapped_platform_is_dropped() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\n${KernelProjs}\n")
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], "ppc"), &BTreeSet::new());
    let outcome = run.result.unwrap();

    assert_eq!(outcome.seen.curr, set(&["app", "uistring", "synopkgutils"]));
}

#[test]
fn test_kernel_without_platform_expands_to_every_kernel() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\n${KernelProjs}\n")
        .unwrap();

    let run = run(&fixture.tree(), &request(&["app"], ""), &BTreeSet::new());
    let outcome = run.result.unwrap();

    assert!(outcome.seen.curr.is_superset(&set(&["linux-3.10", "linux-4.4"])));
}

#[test]
fn test_hook_failure_aborts_traversal() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nlibfoo\n")
        .unwrap()
        .with_depends("libfoo", "[BuildDependent]\nlibc\n")
        .unwrap();
    let tree = fixture.tree();
    let mut store = GraphStore::load_base(&tree.base_config()).unwrap();
    let mut calls = 0;
    let mut failing = |_: &LayerConfig| -> anyhow::Result<()> {
        calls += 1;
        anyhow::bail!("checkout failed")
    };

    let err = traverse_source(
        &request(&["app"], "x64"),
        &mut store,
        &tree,
        &BTreeSet::new(),
        Some(&mut failing),
    )
    .unwrap_err();

    assert!(matches!(err, DependsError::Hook { .. }));
    assert_eq!(calls, 1);
}

#[test]
fn test_custom_basic_projects() {
    let fixture = fixture()
        .with_depends("app", "[BuildDependent]\nuistring\n")
        .unwrap();
    let request = request(&["app"], "x64").with_basic_projects(Vec::<String>::new());

    let run = run(&fixture.tree(), &request, &BTreeSet::new());

    assert_eq!(run.layers[0].curr_projects, set(&["uistring"]));
}

#[test]
fn test_layer_config_serializes() {
    let layer = LayerConfig {
        curr_projects: set(&["b", "a"]),
        base_projects: BTreeSet::new(),
        base_target: "7.0".to_string(),
        include_base: false,
    };
    let json = serde_json::to_value(&layer).unwrap();
    assert_eq!(json["curr_projects"], serde_json::json!(["a", "b"]));
    assert_eq!(json["base_target"], "7.0");
}
