use crate::testing::SourceTreeFixture;
use std::path::Path;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 1);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.color, ColorChoice::Auto);
    assert!(config.root.is_none());
}

#[test]
fn test_merge_takes_non_default_values() {
    let base = AppConfig {
        root: Some(PathBuf::from("/from/env")),
        color: ColorChoice::Never,
        ..AppConfig::default()
    };
    let cli = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(cli);

    assert_eq!(merged.root, Some(PathBuf::from("/from/env")));
    assert_eq!(merged.color, ColorChoice::Never);
    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.log_format, LogFormat::Json);
}

#[test]
fn test_validate_rejects_missing_root() {
    let mut config = AppConfig {
        root: Some(PathBuf::from("/nonexistent/tree/root")),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRoot { .. })
    ));
}

#[test]
fn test_validate_fills_root_from_current_dir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();
    assert!(config.root.is_some());
}

#[test]
fn test_paths_default_under_root() {
    let fixture = SourceTreeFixture::new().unwrap();
    let config = AppConfig {
        root: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };

    assert_eq!(
        config.depends_file_path(),
        fixture.path().join("pkgscripts/include/project.depends")
    );
    assert_eq!(
        config.env_config_path(),
        fixture.path().join("pkgscripts/include/env.config")
    );
}

#[test]
fn test_explicit_paths_override_root() {
    let config = AppConfig {
        root: Some(PathBuf::from("/tree")),
        depends_file: Some(PathBuf::from("/etc/project.depends")),
        ..AppConfig::default()
    };
    assert_eq!(config.depends_file_path(), Path::new("/etc/project.depends"));
}

#[test]
fn test_logger_config_resolves_color() {
    let config = AppConfig {
        log_level: 4,
        color: ColorChoice::Always,
        ..AppConfig::default()
    };
    let logger = config.to_logger_config(false);
    assert_eq!(logger.level, LogLevel::Trace);
    assert!(logger.ansi);
}
