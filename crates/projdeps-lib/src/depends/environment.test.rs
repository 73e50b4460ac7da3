// Tests for build environment collaborators

use crate::testing::SourceTreeFixture;

const OVERRIDE_WITH_ENV: &str = r#"
[BuildDependent]
libfoo

[default]
all = "6.2"
x64 = "7.0 ignored"
empty = ""

[nightly]
all = "7.1"
"#;

#[test]
fn test_fixed_environment_applies_to_every_platform() {
    let env = BaseEnvironment::fixed("6.1");
    assert_eq!(env.resolve_base_target("armv7"), "6.1");
    assert_eq!(env.resolve_base_target("x64"), "6.1");
}

#[test]
fn test_load_default_section() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_depends("app", OVERRIDE_WITH_ENV)
        .unwrap();
    let path = fixture.tree().depends_path("app");

    let env = BaseEnvironment::load(Some(&path), None).unwrap();

    assert_eq!(env.resolve_base_target("x64"), "7.0");
    assert_eq!(env.resolve_base_target("armv7"), "6.2");
    assert_eq!(env.get("empty"), None);
}

#[test]
fn test_load_named_section() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_depends("app", OVERRIDE_WITH_ENV)
        .unwrap();
    let path = fixture.tree().depends_path("app");

    let env = BaseEnvironment::load(Some(&path), Some("nightly")).unwrap();

    assert_eq!(env.resolve_base_target("x64"), "7.1");
}

#[test]
fn test_missing_file_is_unknown_environment() {
    let env = BaseEnvironment::load(Some(Path::new("/nonexistent/depends")), None).unwrap();
    assert_eq!(env.resolve_base_target("x64"), UNKNOWN_VERSION);

    let env = BaseEnvironment::load(None, None).unwrap();
    assert_eq!(env.resolve_base_target("x64"), UNKNOWN_VERSION);
}

#[test]
fn test_malformed_environment_line_is_fatal() {
    let doc = ConfigDocument::parse("depends", "[default]\nall 6.2\n");
    let err = BaseEnvironment::from_document(&doc, DEFAULT_ENV_SECTION).unwrap_err();
    assert!(matches!(err, DependsError::Syntax { line_no: 2, .. }));
}

#[test]
fn test_unresolvable_platform_yields_empty_target() {
    let mut env = BaseEnvironment::new();
    env.set("armv7", "6.0");
    assert_eq!(env.resolve_base_target("x64"), "");
}

#[test]
fn test_builtins_from_env_config() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_builtin_projects(&["libc", "busybox", "libc"])
        .unwrap();
    let builtins = EnvConfigBuiltins::new(fixture.tree().env_config());

    let projects = builtins.builtin_projects().unwrap();

    assert_eq!(
        projects,
        BTreeSet::from(["busybox".to_string(), "libc".to_string()])
    );
}

#[test]
fn test_builtins_last_assignment_wins() {
    let fixture = SourceTreeFixture::new().unwrap();
    fixture
        .write_file(
            "pkgscripts/include/env.config",
            "BuiltinProjects=\"old\"\nBuiltinProjectsExtra=\"nope\"\nexport BuiltinProjects=\"new1 new2\" # comment\n",
        )
        .unwrap();
    let builtins = EnvConfigBuiltins::new(fixture.tree().env_config());

    let projects = builtins.builtin_projects().unwrap();

    assert_eq!(
        projects,
        BTreeSet::from(["new1".to_string(), "new2".to_string()])
    );
}

#[test]
fn test_builtins_missing_file_is_empty() {
    let builtins = EnvConfigBuiltins::new("/nonexistent/env.config");
    assert!(builtins.builtin_projects().unwrap().is_empty());
}

#[test]
fn test_plain_set_is_a_builtin_source() {
    let set = BTreeSet::from(["libc".to_string()]);
    assert_eq!(set.builtin_projects().unwrap(), set);
}
