fn layer(curr: &[&str], base: &[&str], include_base: bool) -> LayerConfig {
    LayerConfig {
        curr_projects: curr.iter().map(|s| s.to_string()).collect(),
        base_projects: base.iter().map(|s| s.to_string()).collect(),
        base_target: "7.0".to_string(),
        include_base,
    }
}

#[test]
fn test_text_layers_are_numbered() {
    let mut reporter = LayerReporter::new(Vec::new(), false);
    reporter.perform(&layer(&["libfoo", "pkgtool"], &[], false)).unwrap();
    reporter.perform(&layer(&["libc"], &[], false)).unwrap();

    let out = reporter.finish(&SourceOutcome::default(), false).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("layer 1 curr: libfoo pkgtool\nlayer 2 curr: libc\n"));
    assert!(text.contains("seen curr: \n"));
    assert!(!text.contains("base"));
}

#[test]
fn test_text_base_tier_only_when_included() {
    let mut reporter = LayerReporter::new(Vec::new(), false);
    reporter.perform(&layer(&[], &["libbase"], true)).unwrap();
    assert_eq!(reporter.layers(), 1);

    let out = reporter.finish(&SourceOutcome::default(), true).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("layer 1 base: libbase\n"));
    assert!(text.contains("packaging base: \n"));
}

#[test]
fn test_json_lines() {
    let mut reporter = LayerReporter::new(Vec::new(), true);
    reporter.perform(&layer(&["b", "a"], &[], false)).unwrap();

    let out = reporter.finish(&SourceOutcome::default(), false).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["layer"], 1);
    assert_eq!(lines[0]["curr_projects"], serde_json::json!(["a", "b"]));
    assert_eq!(lines[0]["base_target"], "7.0");
    assert!(lines[1]["seen"]["curr"].is_array());
}
