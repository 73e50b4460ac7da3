// Tests for source tree lookups

use crate::testing::SourceTreeFixture;

#[test]
fn test_project_key_plain_file() {
    assert_eq!(project_key("libfoo", "depends"), "libfoo");
}

#[test]
fn test_project_key_appends_file_virtual_suffix() {
    assert_eq!(project_key("app", "depends-virtual-lite"), "app-virtual-lite");
}

#[test]
fn test_project_key_strips_directory_virtual_suffix() {
    assert_eq!(project_key("app-virtual-old", "depends"), "app");
    assert_eq!(
        project_key("app-virtual-old", "depends-virtual-lite"),
        "app-virtual-lite"
    );
}

#[test]
fn test_depends_file_missing_is_none() {
    let fixture = SourceTreeFixture::new().unwrap().with_project("app").unwrap();
    assert!(fixture.tree().depends_file("app").is_none());
    assert!(fixture.tree().depends_file("never-checked-out").is_none());
}

#[test]
fn test_depends_file_prefers_virtual_suffix() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_depends("app", "[BuildDependent]\n")
        .unwrap()
        .with_depends("app-virtual-lite", "[BuildDependent]\n")
        .unwrap();
    let tree = fixture.tree();

    let virtual_file = tree.depends_file("app-virtual-lite").unwrap();
    assert!(virtual_file.ends_with("SynoBuildConf/depends-virtual-lite"));

    // Unknown suffix falls back to the plain file
    let fallback = tree.depends_file("app-virtual-other").unwrap();
    assert!(fallback.ends_with("SynoBuildConf/depends"));
}

#[test]
fn test_depends_file_never_resolves_variable_tokens() {
    let fixture = SourceTreeFixture::new().unwrap();
    assert!(fixture.tree().depends_file("${KernelProjs}").is_none());
}

#[test]
fn test_depends_files_enumerates_sorted_keys() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_depends("zlib", "")
        .unwrap()
        .with_depends("app", "")
        .unwrap()
        .with_depends("app-virtual-lite", "")
        .unwrap()
        .with_project("no-conf")
        .unwrap();

    let keys: Vec<String> = fixture
        .tree()
        .depends_files()
        .unwrap()
        .into_iter()
        .map(|(key, _)| key)
        .collect();

    assert_eq!(keys, vec!["app", "app-virtual-lite", "zlib"]);
}

#[test]
fn test_depends_files_without_source_dir_is_empty() {
    let fixture = SourceTreeFixture::new().unwrap();
    assert!(fixture.tree().depends_files().unwrap().is_empty());
}
