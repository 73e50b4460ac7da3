// Tests for the config scanner

// ============================================================================
// Logical lines
// ============================================================================

#[test]
fn test_logical_lines_skip_blank_and_comment_lines() {
    let text = "\n# header comment\n   \n[variables]\n  # indented comment\nA = \"x\"\n";
    let lines: Vec<LogicalLine> = logical_lines(text).collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "[variables]");
    assert_eq!(lines[0].line_no, 4);
    assert_eq!(lines[1].text, "A = \"x\"");
    assert_eq!(lines[1].line_no, 6);
}

#[test]
fn test_logical_lines_strip_trailing_comment() {
    let lines: Vec<LogicalLine> = logical_lines("libfoo   # needed for tests\n").collect();
    assert_eq!(lines[0].text, "libfoo");
}

// ============================================================================
// Key/value pairs
// ============================================================================

#[test]
fn test_parse_key_value_splits_value_list() {
    let (key, values) = parse_key_value("dsm = \"libc  libssl zlib\"").unwrap();
    assert_eq!(key, "dsm");
    assert_eq!(values, vec!["libc", "libssl", "zlib"]);
}

#[test]
fn test_parse_key_value_without_spaces() {
    let (key, values) = parse_key_value("BuiltinProjects=\"uistring synopkgutils\"").unwrap();
    assert_eq!(key, "BuiltinProjects");
    assert_eq!(values, vec!["uistring", "synopkgutils"]);
}

#[test]
fn test_parse_key_value_empty_value() {
    let (key, values) = parse_key_value("libfoo = \"\"").unwrap();
    assert_eq!(key, "libfoo");
    assert!(values.is_empty());
}

#[test]
fn test_parse_key_value_unterminated_quote_takes_rest() {
    let (_, values) = parse_key_value("a = \"b c").unwrap();
    assert_eq!(values, vec!["b", "c"]);
}

#[test]
fn test_parse_key_value_rejects_malformed_lines() {
    assert!(parse_key_value("libfoo").is_none());
    assert!(parse_key_value("a = b").is_none());
    assert!(parse_key_value("= \"b\"").is_none());
}

// ============================================================================
// Section headers
// ============================================================================

#[test]
fn test_section_header_plain() {
    let header = SectionHeader::parse("[project dependency]").unwrap();
    assert_eq!(header.name, "project dependency");
    assert_eq!(header.raw, "project dependency");
    assert!(header.tags.is_none());
}

#[test]
fn test_section_header_with_tags() {
    let header = SectionHeader::parse("[BuildDependent:armv7,x64]").unwrap();
    assert_eq!(header.name, "BuildDependent");
    assert_eq!(
        header.tags,
        Some(vec!["armv7".to_string(), "x64".to_string()])
    );
    assert!(header.lists_platform("x64"));
    assert!(!header.lists_platform("x86"));
    assert!(!header.lists_platform(""));
}

#[test]
fn test_section_header_rejects_non_headers() {
    assert!(SectionHeader::parse("libfoo").is_none());
    assert!(SectionHeader::parse("[unterminated").is_none());
}

#[test]
fn test_section_kind_round_trips_names() {
    for kind in SectionKind::BASE.into_iter().chain(SectionKind::OVERRIDE) {
        assert_eq!(SectionKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(SectionKind::from_name("unknown"), None);
}

// ============================================================================
// Documents
// ============================================================================

const OVERRIDE_TEXT: &str = r#"
stray-line-before-any-section
[BuildDependent]
libgeneric

[BuildDependent:armv7,x64]
libarm

[BuildDependent-Bug]
libbroken = "libfixed"
"#;

#[test]
fn test_document_drops_lines_before_first_section() {
    let doc = ConfigDocument::parse("depends", OVERRIDE_TEXT);
    assert_eq!(doc.sections().len(), 3);
    assert_eq!(doc.sections()[0].lines[0].text, "libgeneric");
}

#[test]
fn test_select_header_prefers_tagged_section_listing_platform() {
    let doc = ConfigDocument::parse("depends", OVERRIDE_TEXT);
    assert_eq!(
        doc.select_header(SectionKind::Build, "armv7"),
        "BuildDependent:armv7,x64"
    );
    assert_eq!(doc.select_header(SectionKind::Build, "ppc"), "BuildDependent");
    assert_eq!(doc.select_header(SectionKind::Build, ""), "BuildDependent");
}

#[test]
fn test_key_values_reports_syntax_error_with_position() {
    let doc = ConfigDocument::parse("base.depends", "[variables]\nA = \"x\"\nnot a pair\n");
    let section = &doc.sections()[0];
    let err = doc.key_values(section).unwrap_err();

    match err {
        DependsError::Syntax { line_no, line, .. } => {
            assert_eq!(line_no, 3);
            assert_eq!(line, "not a pair");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_read_missing_file_is_io_error() {
    let err = ConfigDocument::read(Path::new("/nonexistent/projdeps/depends")).unwrap_err();
    assert!(matches!(err, DependsError::Io { .. }));
}
