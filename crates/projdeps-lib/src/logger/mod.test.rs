use clap::ValueEnum;

#[test]
fn test_filter_directives_scope_our_crates() {
    assert_eq!(
        Logger::filter_directives(LogLevel::Debug),
        "projdeps_lib=debug,projdeps=debug,warn"
    );
    assert_eq!(
        Logger::filter_directives(LogLevel::Error),
        "projdeps_lib=error,projdeps=error,warn"
    );
}

#[test]
fn test_filter_directives_parse() {
    for level in LogLevel::value_variants() {
        assert!(EnvFilter::try_new(Logger::filter_directives(*level)).is_ok());
    }
}

#[test]
fn test_global_logger_reflects_initialization() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
