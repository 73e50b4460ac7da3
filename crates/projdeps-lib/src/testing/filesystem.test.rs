use super::*;

#[test]
fn test_fixture_lays_out_source_tree() -> io::Result<()> {
    let fixture = SourceTreeFixture::new()?
        .with_base_config("[variables]\n")?
        .with_depends("app", "[BuildDependent]\nlibfoo\n")?
        .with_depends("app-virtual-lite", "[BuildDependent]\nlibfoo-lite\n")?;

    assert!(fixture.path().join("pkgscripts/include/project.depends").is_file());
    assert!(fixture.path().join("source/app/SynoBuildConf/depends").is_file());
    assert!(
        fixture
            .path()
            .join("source/app/SynoBuildConf/depends-virtual-lite")
            .is_file()
    );
    Ok(())
}

#[test]
fn test_fixture_isolation() -> io::Result<()> {
    let first = SourceTreeFixture::new()?.with_project("app")?;
    let second = SourceTreeFixture::new()?;

    assert_ne!(first.path(), second.path());
    assert!(!second.path().join("source/app").exists());
    Ok(())
}

#[test]
fn test_builtin_projects_written_as_shell_assignment() -> io::Result<()> {
    let fixture = SourceTreeFixture::new()?.with_builtin_projects(&["uistring", "libc"])?;
    let content = fs::read_to_string(fixture.path().join("pkgscripts/include/env.config"))?;
    assert!(content.contains("BuiltinProjects=\"uistring libc\""));
    Ok(())
}
