use crate::depends::DependsError;
use crate::testing::SourceTreeFixture;

const BASE_CONFIG: &str = r#"
[variables]
CoreLibs = "libc libssl"

[project dependency]
libssl = "libc"
libfoo = "CoreLibs"
libbar = "libfoo"
tool = "libbar ${KernelProjs}"

[platform kernel]
x64 = "linux-4.4"
armv7 = "linux-3.10"
"#;

fn fixture() -> SourceTreeFixture {
    SourceTreeFixture::new()
        .unwrap()
        .with_base_config(BASE_CONFIG)
        .unwrap()
        .with_depends("app", "[BuildDependent]\nlibbar\n[BuildDependent:x64]\nlibbar\nlibsimd\n")
        .unwrap()
        .with_depends("app-virtual-lite", "[BuildDependent]\nlibfoo\n")
        .unwrap()
}

fn config_for(fixture: &SourceTreeFixture) -> AppConfig {
    AppConfig {
        root: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    }
}

fn target(platforms: &[&str], projects: &[&str]) -> TargetArgs {
    TargetArgs {
        platforms: platforms.iter().map(|s| s.to_string()).collect(),
        projects: projects.iter().map(|s| s.to_string()).collect(),
    }
}

fn run(fixture: &SourceTreeFixture, command: Commands) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_writer(command, &config_for(fixture), &mut out)?;
    Ok(String::from_utf8(out)?)
}

// ============================================================================
// order
// ============================================================================

#[test]
fn test_order_reorders_requested_only() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Order {
            depth: None,
            target: target(&[], &["libbar", "libc", "libfoo"]),
        },
    )
    .unwrap();

    assert_eq!(output, "libc libfoo libbar\n");
}

#[test]
fn test_order_full_depth_includes_prerequisites() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Order {
            depth: Some(0),
            target: target(&[], &["libbar"]),
        },
    )
    .unwrap();

    assert_eq!(output, "libc libssl libfoo libbar\n");
}

#[test]
fn test_order_depth_limit() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Order {
            depth: Some(1),
            target: target(&[], &["libbar"]),
        },
    )
    .unwrap();

    assert_eq!(output, "libfoo libbar\n");
}

#[test]
fn test_order_uses_platform_override_sections() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Order {
            depth: Some(1),
            target: target(&["x64"], &["app"]),
        },
    )
    .unwrap();

    assert_eq!(output, "libbar libsimd app\n");
}

#[test]
fn test_order_resolves_kernel_for_platform() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Order {
            depth: Some(1),
            target: target(&["armv7"], &["tool"]),
        },
    )
    .unwrap();

    assert_eq!(output, "libbar linux-3.10 tool\n");
}

#[test]
fn test_order_reserved_kernel_request() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Order {
            depth: None,
            target: target(&[], &["linux-4.4"]),
        },
    )
    .unwrap();

    assert_eq!(output, "linux-4.4\n");
}

#[test]
fn test_order_reserved_kernel_precedes_its_dependents() {
    let fixture = fixture()
        .with_depends("drivers", "[BuildDependent]\nlinux-4.4\n")
        .unwrap();
    let output = run(
        &fixture,
        Commands::Order {
            depth: None,
            target: target(&[], &["linux-4.4", "drivers"]),
        },
    )
    .unwrap();

    assert_eq!(output, "linux-4.4 drivers\n");
}

#[test]
fn test_order_collapses_virtual_projects() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Order {
            depth: None,
            target: target(&[], &["app-virtual-lite", "app"]),
        },
    )
    .unwrap();

    assert_eq!(output, "app-virtual-lite\n");
}

#[test]
fn test_order_cycle_is_dependency_error() {
    let fixture = fixture()
        .with_depends("ping", "[BuildDependent]\npong\n")
        .unwrap()
        .with_depends("pong", "[BuildDependent]\nping\n")
        .unwrap();

    let err = run(
        &fixture,
        Commands::Order {
            depth: Some(0),
            target: target(&[], &["ping"]),
        },
    )
    .unwrap_err();

    let depends = err.downcast_ref::<DependsError>().unwrap();
    assert_eq!(depends.exit_code(), 5);
    assert_eq!(err.to_string(), "Circular dependency: ping->pong->ping");
}

#[test]
fn test_order_syntax_error_in_base_config() {
    let fixture = SourceTreeFixture::new()
        .unwrap()
        .with_base_config("[project dependency]\nbroken line\n")
        .unwrap();

    let err = run(
        &fixture,
        Commands::Order {
            depth: None,
            target: target(&[], &["app"]),
        },
    )
    .unwrap_err();

    let depends = err.chain().find_map(|e| e.downcast_ref::<DependsError>()).unwrap();
    assert_eq!(depends.exit_code(), 4);
}

// ============================================================================
// rdepends
// ============================================================================

#[test]
fn test_rdepends_unlimited() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Rdepends {
            depth: 0,
            target: target(&[], &["libssl"]),
        },
    )
    .unwrap();

    assert_eq!(output, "app libbar libfoo libssl tool\n");
}

#[test]
fn test_rdepends_one_level() {
    let fixture = fixture();
    let output = run(
        &fixture,
        Commands::Rdepends {
            depth: 1,
            target: target(&[], &["libfoo"]),
        },
    )
    .unwrap();

    assert_eq!(output, "app-virtual-lite libbar libfoo\n");
}

// ============================================================================
// source
// ============================================================================

#[test]
fn test_source_reports_layers_and_outcome() {
    let fixture = fixture()
        .with_depends("libbar", "[BuildDependent]\nlibfoo\n")
        .unwrap();

    let output = run(
        &fixture,
        Commands::Source {
            platform: "x64".to_string(),
            base: false,
            base_version: Some("7.0".to_string()),
            env_section: None,
            json: false,
            projects: vec!["app".to_string()],
        },
    )
    .unwrap();

    assert!(output.starts_with("layer 1 curr: libbar libsimd\nlayer 2 curr: libfoo\n"));
    assert!(output.contains("seen curr: app libbar libfoo libsimd synopkgutils uistring\n"));
}

#[test]
fn test_source_json_carries_base_target_from_environment() {
    let fixture = fixture()
        .with_depends("svc", "[BuildDependent]\nlibfoo\n[default]\nall = \"6.2\"\nx64 = \"7.0\"\n")
        .unwrap();

    let output = run(
        &fixture,
        Commands::Source {
            platform: "x64".to_string(),
            base: false,
            base_version: None,
            env_section: None,
            json: true,
            projects: vec!["svc".to_string()],
        },
    )
    .unwrap();

    let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
    assert_eq!(first["layer"], 1);
    assert_eq!(first["base_target"], "7.0");
    assert_eq!(first["curr_projects"], serde_json::json!(["libfoo"]));
}

#[test]
fn test_source_base_tier_uses_base_graph() {
    let fixture = fixture()
        .with_depends("svc", "[BuildDependent-Tag]\nlibfoo\n")
        .unwrap();

    let output = run(
        &fixture,
        Commands::Source {
            platform: "x64".to_string(),
            base: true,
            base_version: Some("7.0".to_string()),
            env_section: None,
            json: false,
            projects: vec!["svc".to_string()],
        },
    )
    .unwrap();

    assert!(output.contains("layer 1 base: libfoo\n"));
    assert!(output.contains("layer 2 base: CoreLibs\n"));
    assert!(output.contains("seen base: libc libfoo libssl\n"));
}
