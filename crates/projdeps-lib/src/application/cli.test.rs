fn parse(args: &[&str]) -> CliConfig {
    CliConfig::try_from_args(std::iter::once("projdeps").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_order_with_attached_depth() {
    let cli = parse(&["order", "-x3", "-p", "x64", "app"]);
    match cli.command {
        Some(Commands::Order { depth, target }) => {
            assert_eq!(depth, Some(3));
            assert_eq!(target.platforms, vec!["x64"]);
            assert_eq!(target.projects, vec!["app"]);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_order_without_depth_is_reorder() {
    let cli = parse(&["order", "b", "a"]);
    assert!(matches!(cli.command, Some(Commands::Order { depth: None, .. })));
}

#[test]
fn test_space_separated_platforms() {
    let cli = parse(&["rdepends", "--platform", "x64 armv7", "libc"]);
    match cli.command {
        Some(Commands::Rdepends { depth, target }) => {
            assert_eq!(depth, 0);
            assert_eq!(target.platforms, vec!["x64", "armv7"]);
            assert_eq!(target.section_platform(), "");
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_single_platform_selects_sections() {
    let target = TargetArgs {
        platforms: vec!["x64".to_string()],
        projects: vec!["app".to_string()],
    };
    assert_eq!(target.section_platform(), "x64");
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = parse(&["order", "app", "--root", "/tmp", "--log-level", "3"]);
    assert_eq!(cli.app_config.root, Some(std::path::PathBuf::from("/tmp")));
    assert_eq!(cli.app_config.log_level, 3);
}

#[test]
fn test_source_options() {
    let cli = parse(&["source", "-p", "x64", "--base", "--base-version", "7.0", "--json", "app"]);
    match cli.command {
        Some(Commands::Source {
            platform,
            base,
            base_version,
            env_section,
            json,
            projects,
        }) => {
            assert_eq!(platform, "x64");
            assert!(base && json);
            assert_eq!(base_version.as_deref(), Some("7.0"));
            assert!(env_section.is_none());
            assert_eq!(projects, vec!["app"]);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_missing_projects_is_argument_error() {
    let err = CliConfig::try_from_args(["projdeps", "order", "-x", "1"]).err().unwrap();
    assert!(matches!(err, ConfigError::InvalidArguments { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_non_numeric_depth_is_argument_error() {
    let err = CliConfig::try_from_args(["projdeps", "order", "-x", "deep", "app"]).err().unwrap();
    assert!(matches!(err, ConfigError::InvalidArguments { .. }));
}
