// Tests for graph store assembly

use crate::testing::SourceTreeFixture;

const BASE_CONFIG: &str = r#"
# Global dependency configuration
[variables]
KernelProjs = "linux-3.10 linux-4.4"
CoreLibs = "libc libssl"
Empty = ""

[project dependency]
app = "CoreLibs libfoo"
libfoo = "libc"
orphan = ""

[platform kernel]
armv7 = "linux-3.10"
x64 = "linux-4.4 ignored-extra"

[unrelated section]
this line is not checked
"#;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_base_document_loads_all_three_sections() {
    let doc = ConfigDocument::parse("project.depends", BASE_CONFIG);
    let store = GraphStore::from_base_document(&doc).unwrap();

    assert_eq!(store.variables.get("CoreLibs"), Some(&strings(&["libc", "libssl"])));
    assert!(!store.variables.contains_key("Empty"));
    assert_eq!(store.graph.get("app"), Some(&strings(&["CoreLibs", "libfoo"])[..]));
    assert!(!store.graph.contains("orphan"));
    assert_eq!(store.kernels.get("armv7").map(String::as_str), Some("linux-3.10"));
    assert_eq!(store.kernels.get("x64").map(String::as_str), Some("linux-4.4"));
}

#[test]
fn test_base_document_syntax_error_is_fatal() {
    let doc = ConfigDocument::parse("project.depends", "[project dependency]\napp libfoo\n");
    let err = GraphStore::from_base_document(&doc).unwrap_err();
    assert!(matches!(err, DependsError::Syntax { .. }));
}

#[test]
fn test_missing_base_file_yields_empty_store() {
    let store = GraphStore::load_base(Path::new("/nonexistent/project.depends")).unwrap();
    assert!(store.graph.is_empty());
    assert!(store.variables.is_empty());
    assert!(store.kernels.is_empty());
}

#[test]
fn test_merge_override_replaces_entry_and_applies_bugs() {
    let doc = ConfigDocument::parse("project.depends", BASE_CONFIG);
    let mut store = GraphStore::from_base_document(&doc).unwrap();

    let conf = DependsConf {
        build: crate::depends::TierLists {
            curr: strings(&["libnew"]),
            base: strings(&["libbase"]),
        },
        bug: BTreeMap::from([("libfoo".to_string(), Vec::new())]),
        ..DependsConf::default()
    };
    store.merge_override("app", &conf, Path::new("source/app/SynoBuildConf/depends"));

    assert_eq!(store.graph.get("app"), Some(&strings(&["libbase", "libnew"])[..]));
    assert!(!store.graph.contains("libfoo"));
}

#[test]
fn test_load_merges_override_files_from_tree() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_base_config(BASE_CONFIG)
        .unwrap()
        .with_depends(
            "app",
            "[BuildDependent]\nlibfoo\n[BuildDependent:x64]\nlibfoo\nlibsimd\n",
        )
        .unwrap()
        .with_depends("app-virtual-lite", "[BuildDependent]\nlibfoo-lite\n")
        .unwrap();
    let tree = fixture.tree();

    let store = GraphStore::load(&tree, &tree.base_config(), "x64").unwrap();

    assert_eq!(store.graph.get("app"), Some(&strings(&["libfoo", "libsimd"])[..]));
    assert_eq!(store.graph.get("app-virtual-lite"), Some(&strings(&["libfoo-lite"])[..]));
    assert_eq!(store.graph.get("libfoo"), Some(&strings(&["libc"])[..]));
}

#[test]
fn test_load_without_platform_uses_untagged_sections() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_depends("app", "[BuildDependent]\nlibfoo\n[BuildDependent:x64]\nlibsimd\n")
        .unwrap();
    let tree = fixture.tree();

    let store = GraphStore::load(&tree, &tree.base_config(), "").unwrap();
    assert_eq!(store.graph.get("app"), Some(&strings(&["libfoo"])[..]));
}
