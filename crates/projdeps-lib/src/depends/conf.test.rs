// Tests for override file parsing

const FULL_CONF: &str = r#"
[BuildDependent]
libfoo
libbar   # shared with packaging

[BuildDependent-Tag]
libbase

[BuildDependent:x64]
libfoo-x64

[ReferenceOnly]
uistring

[ReferenceOnly-Tag]
sdk-headers

[PackagePacking]
pkg-helper

[PackagePacking-Tag]
pkg-base-helper

[BuildDependent-Bug]
libbroken = "libfixed"
libobsolete = ""
"#;

fn parse(platform: &str) -> DependsConf {
    let doc = ConfigDocument::parse("SynoBuildConf/depends", FULL_CONF);
    DependsConf::from_document(&doc, platform).unwrap()
}

#[test]
fn test_untagged_sections_fill_current_and_base_tiers() {
    let conf = parse("armv7");

    assert_eq!(conf.build.curr, vec!["libfoo", "libbar"]);
    assert_eq!(conf.build.base, vec!["libbase"]);
    assert_eq!(conf.reference.curr, vec!["uistring"]);
    assert_eq!(conf.reference.base, vec!["sdk-headers"]);
    assert_eq!(conf.packaging.curr, vec!["pkg-helper"]);
    assert_eq!(conf.packaging.base, vec!["pkg-base-helper"]);
}

#[test]
fn test_tagged_section_replaces_untagged_for_listed_platform() {
    let conf = parse("x64");
    assert_eq!(conf.build.curr, vec!["libfoo-x64"]);
    // Other kinds have no tagged variant and keep their untagged section
    assert_eq!(conf.build.base, vec!["libbase"]);
}

#[test]
fn test_bug_overrides_keep_empty_lists() {
    let conf = parse("");
    assert_eq!(conf.bug.get("libbroken"), Some(&vec!["libfixed".to_string()]));
    assert_eq!(conf.bug.get("libobsolete"), Some(&Vec::new()));
}

#[test]
fn test_build_dependencies_list_base_tier_first() {
    let conf = parse("");
    assert_eq!(
        conf.build_dependencies(),
        vec!["libbase", "libfoo", "libbar"]
    );
}

#[test]
fn test_malformed_bug_entry_is_syntax_error() {
    let doc = ConfigDocument::parse("depends", "[BuildDependent-Bug]\nlibbroken\n");
    let err = DependsConf::from_document(&doc, "").unwrap_err();
    assert!(matches!(err, DependsError::Syntax { line_no: 2, .. }));
}

#[test]
fn test_unknown_sections_are_ignored() {
    let doc = ConfigDocument::parse("depends", "[default]\nall = \"7.0\"\n[BuildDependent]\nlibfoo\n");
    let conf = DependsConf::from_document(&doc, "").unwrap();
    assert_eq!(conf.build.curr, vec!["libfoo"]);
    assert!(conf.bug.is_empty());
}
