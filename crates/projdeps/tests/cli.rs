//! E2E tests for the projdeps binary: output lines and exit codes

use assert_cmd::Command;
use predicates::prelude::*;
use projdeps_lib::testing::SourceTreeFixture;
use std::path::Path;

const BASE_CONFIG: &str = r#"
[variables]
KernelProjs = "linux-3.10 linux-4.4"

[project dependency]
libcrypto = "libc"
libssl = "libcrypto libc"
webapi = "libssl libjson"
libjson = "libc"

[platform kernel]
armv7 = "linux-3.10"
x64 = "linux-4.4"
"#;

fn projdeps_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("projdeps"));
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--root").arg(dir);
    cmd
}

fn fixture() -> SourceTreeFixture {
    SourceTreeFixture::new()
        .and_then(|f| f.with_base_config(BASE_CONFIG))
        .expect("fixture should be created")
}

#[test]
fn e2e_order_prints_one_line() {
    let tree = fixture();

    projdeps_cmd(tree.path())
        .args(["order", "-x", "0", "webapi"])
        .assert()
        .success()
        .stdout("libc libcrypto libssl libjson webapi\n");
}

#[test]
fn e2e_order_without_depth_reorders_request() {
    let tree = fixture();

    projdeps_cmd(tree.path())
        .args(["order", "webapi", "libc", "libssl"])
        .assert()
        .success()
        .stdout("libc libssl webapi\n");
}

#[test]
fn e2e_space_separated_platforms_resolve_each_kernel() {
    let tree = fixture()
        .with_depends("app", "[BuildDependent]\n${KernelProjs}\n")
        .expect("override should be written");

    projdeps_cmd(tree.path())
        .args(["order", "-x", "0", "-p", "x64 armv7", "app"])
        .assert()
        .success()
        .stdout("linux-3.10 linux-4.4 app\n");
}

#[test]
fn e2e_rdepends_prints_dependents() {
    let tree = fixture();

    projdeps_cmd(tree.path())
        .args(["rdepends", "-r", "1", "libcrypto"])
        .assert()
        .success()
        .stdout("libcrypto libssl\n");
}

#[test]
fn e2e_source_prints_layers() {
    let tree = fixture()
        .with_depends("app", "[BuildDependent]\nlibfoo\n[ReferenceOnly]\nlibdoc\n")
        .expect("override should be written");

    projdeps_cmd(tree.path())
        .args(["source", "-p", "x64", "app"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("layer 1 curr: libfoo\n"))
        .stdout(predicate::str::contains("reference-only curr: libdoc\n"));
}

#[test]
fn e2e_cycle_exits_with_dependency_code() {
    let tree = fixture()
        .with_depends("alpha", "[BuildDependent]\nbeta\n")
        .and_then(|f| f.with_depends("beta", "[BuildDependent]\nalpha\n"))
        .expect("overrides should be written");

    projdeps_cmd(tree.path())
        .args(["order", "-x", "0", "alpha"])
        .assert()
        .code(5)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Circular dependency: alpha->beta->alpha"));
}

#[test]
fn e2e_syntax_error_exits_with_io_code() {
    let tree = SourceTreeFixture::new()
        .and_then(|f| f.with_base_config("[project dependency]\napp libfoo\n"))
        .expect("fixture should be created");

    projdeps_cmd(tree.path())
        .args(["order", "-x", "0", "app"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("app libfoo"));
}

#[test]
fn e2e_bad_argument_exits_with_argument_code() {
    let tree = fixture();

    projdeps_cmd(tree.path())
        .args(["order", "--no-such-flag", "app"])
        .assert()
        .code(3);
}

#[test]
fn e2e_missing_projects_exits_with_argument_code() {
    let tree = fixture();

    projdeps_cmd(tree.path()).args(["order"]).assert().code(3);
}

#[test]
fn e2e_missing_root_exits_with_argument_code() {
    let tree = fixture();
    let missing = tree.path().join("does-not-exist");

    Command::new(assert_cmd::cargo::cargo_bin!("projdeps"))
        .current_dir(tree.path())
        .arg("--root")
        .arg(&missing)
        .args(["order", "app"])
        .assert()
        .code(3);
}

#[test]
fn e2e_no_subcommand_prints_hint() {
    let tree = fixture();

    projdeps_cmd(tree.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("projdeps --help"));
}

#[test]
fn e2e_help_succeeds() {
    let tree = fixture();

    projdeps_cmd(tree.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("order"))
        .stdout(predicate::str::contains("rdepends"))
        .stdout(predicate::str::contains("source"));
}
