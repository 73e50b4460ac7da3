//! E2E tests for reverse dependency expansion

use anyhow::Result;
use projdeps_lib::application::Commands;
use projdeps_tests::{TestTree, target};

#[test]
fn e2e_direct_dependents_of_libc() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Rdepends {
        depth: 1,
        target: target(&[], &["libc"]),
    })?;

    assert_eq!(output, "libc libcrypto libjson libssl libz\n");
    Ok(())
}

#[test]
fn e2e_all_dependents_collapse_virtual_variants() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Rdepends {
        depth: 0,
        target: target(&[], &["libz"]),
    })?;

    assert_eq!(output, "libcurl libz photo-station synosdk webapi\n");
    Ok(())
}

#[test]
fn e2e_dependents_of_kernel_project() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Rdepends {
        depth: 0,
        target: target(&[], &["linux-4.4"]),
    })?;

    assert_eq!(output, "linux-4.4 photo-station synosdk\n");
    Ok(())
}

#[test]
fn e2e_unknown_project_has_only_itself() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Rdepends {
        depth: 0,
        target: target(&[], &["libnothing"]),
    })?;

    assert_eq!(output, "libnothing\n");
    Ok(())
}
