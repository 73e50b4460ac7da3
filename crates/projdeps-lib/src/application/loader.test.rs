use crate::primitives::ColorChoice;
use crate::testing::SourceTreeFixture;

#[test]
fn test_resolve_applies_environment_color() {
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let fixture = SourceTreeFixture::new().unwrap();
    let cli = AppConfig {
        root: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(cli, &env).unwrap();

    assert_eq!(config.color, ColorChoice::Never);
    assert_eq!(config.root.as_deref(), Some(fixture.path()));
}

#[test]
fn test_resolve_cli_color_beats_environment() {
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        color: ColorChoice::Always,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(cli, &env).unwrap();

    assert_eq!(config.color, ColorChoice::Always);
}

#[test]
fn test_resolve_rejects_invalid_root() {
    let cli = AppConfig {
        root: Some("/nonexistent/tree".into()),
        ..AppConfig::default()
    };
    let err = AppConfig::resolve(cli, &EnvironmentConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRoot { .. }));
}
