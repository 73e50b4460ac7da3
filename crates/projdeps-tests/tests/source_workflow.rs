//! E2E tests for layered source traversal

use anyhow::Result;
use projdeps_lib::application::Commands;
use projdeps_lib::depends::DependsError;
use projdeps_tests::TestTree;

fn source(platform: &str, base: bool, projects: &[&str]) -> Commands {
    Commands::Source {
        platform: platform.to_string(),
        base,
        base_version: None,
        env_section: None,
        json: false,
        projects: projects.iter().map(|s| s.to_string()).collect(),
    }
}

fn source_json(platform: &str, base_version: Option<&str>, projects: &[&str]) -> Commands {
    Commands::Source {
        platform: platform.to_string(),
        base: false,
        base_version: base_version.map(str::to_string),
        env_section: None,
        json: true,
        projects: projects.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn e2e_source_current_tier_layers() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(source("x64", false, &["photo-station"]))?;

    let expected = [
        "layer 1 curr: ffmpeg libexif libsimd synosdk",
        "layer 2 curr: ${KernelProjs} webapi",
        "layer 3 curr: ",
        "layer 4 curr: linux-4.4 syno-headers",
        "seen curr: ffmpeg libexif libsimd linux-4.4 photo-station synopkgutils synosdk uistring webapi",
        "reference-only curr: syno-headers",
        "packaging curr: ffmpeg",
    ];
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    Ok(())
}

#[test]
fn e2e_source_with_base_tier_follows_global_graph() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(source("x64", true, &["photo-station"]))?;
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines.contains(&"layer 1 base: libbase"));
    assert!(lines.contains(&"layer 3 base: libcurl libjson"));
    assert!(lines.contains(&"layer 4 base: CryptoLibs libc libz"));
    assert!(lines.contains(&"seen base: libbase libc libcrypto libcurl libjson libssl libz"));
    Ok(())
}

#[test]
fn e2e_source_json_reports_base_target_from_default_section() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(source_json("x64", None, &["photo-station"]))?;
    let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap_or_default())?;

    assert_eq!(first["layer"], 1);
    assert_eq!(first["base_target"], "6.2");
    assert_eq!(first["include_base"], false);

    let last: serde_json::Value = serde_json::from_str(output.lines().last().unwrap_or_default())?;
    assert_eq!(last["for_packaging"]["curr"], serde_json::json!(["ffmpeg"]));
    Ok(())
}

#[test]
fn e2e_source_base_version_overrides_default_section() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(source_json("x64", Some("7.0"), &["photo-station"]))?;
    let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap_or_default())?;

    assert_eq!(first["base_target"], "7.0");
    Ok(())
}

#[test]
fn e2e_builtin_conflict_is_tolerated() -> Result<()> {
    let tree = TestTree::with_packages()?.depends(
        "svc",
        "[BuildDependent]\nlibc\n[BuildDependent-Tag]\nlibc\n",
    )?;

    let output = tree.run(source("x64", true, &["svc"]))?;

    assert!(output.lines().any(|l| l == "layer 1 curr: libc"));
    Ok(())
}

#[test]
fn e2e_non_builtin_conflict_aborts() -> Result<()> {
    let tree = TestTree::with_packages()?.depends(
        "svc",
        "[BuildDependent]\nlibz\n[BuildDependent-Tag]\nlibz\n",
    )?;

    let err = tree.run(source("x64", true, &["svc"])).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DependsError>(),
        Some(DependsError::Conflict { projects }) if projects == &["libz".to_string()]
    ));
    Ok(())
}
