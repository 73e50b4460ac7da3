fn env_from(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_color_disables_color() {
    let env = env_from(&[("NO_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Never);
}

#[test]
fn test_force_color_enables_color() {
    let env = env_from(&[("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Always);
}

#[test]
fn test_force_color_beats_no_color_and_clicolor() {
    let env = env_from(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Always);
}

#[test]
fn test_ci_disables_color() {
    let env = env_from(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env = env_from(&[("NO_COLOR", "")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let env = env_from(&[("FORCE_COLOR", "invalid")]);
    assert_eq!(env.apply_color_config(ColorChoice::Always), ColorChoice::Always);
}

#[test]
fn test_unrelated_variables_are_ignored() {
    let env = env_from(&[("PATH", "/usr/bin"), ("HOME", "/root")]);
    assert!(env.no_color.is_none() && env.ci.is_none());
}
