//! E2E tests for forward ordering over a realistic source tree

use anyhow::Result;
use projdeps_lib::application::Commands;
use projdeps_lib::depends::DependsError;
use projdeps_tests::{TestTree, target, words};

fn position(order: &[&str], project: &str) -> usize {
    order
        .iter()
        .position(|p| *p == project)
        .unwrap_or_else(|| panic!("{project} missing from {order:?}"))
}

#[test]
fn e2e_full_order_for_package() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Order {
        depth: Some(0),
        target: target(&[], &["photo-station"]),
    })?;

    assert_eq!(
        output,
        "libbase libc libcrypto libssl libz libcurl libjson webapi \
         linux-3.10 linux-4.4 synosdk libexif photo-station\n"
    );
    Ok(())
}

#[test]
fn e2e_order_respects_dependencies_per_platform() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Order {
        depth: Some(0),
        target: target(&["x64"], &["photo-station"]),
    })?;
    let order = words(&output);

    assert!(position(&order, "libsimd") < position(&order, "photo-station"));
    assert!(position(&order, "libcrypto") < position(&order, "libssl"));
    assert!(position(&order, "libssl") < position(&order, "libcurl"));
    assert!(position(&order, "webapi") < position(&order, "synosdk"));
    assert!(order.contains(&"linux-4.4"));
    assert!(!order.contains(&"linux-3.10"));
    assert!(!order.iter().any(|p| p.starts_with('$')));
    Ok(())
}

#[test]
fn e2e_reorder_only_requested_projects() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Order {
        depth: None,
        target: target(&[], &["webapi", "libc", "libssl"]),
    })?;

    assert_eq!(output, "libc libssl webapi\n");
    Ok(())
}

#[test]
fn e2e_order_one_level() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Order {
        depth: Some(1),
        target: target(&[], &["webapi"]),
    })?;

    assert_eq!(output, "libcurl libjson webapi\n");
    Ok(())
}

#[test]
fn e2e_virtual_variant_collapses_with_its_base() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let output = tree.run(Commands::Order {
        depth: None,
        target: target(&[], &["photo-station-virtual-lite", "photo-station", "synosdk"]),
    })?;

    assert_eq!(output, "synosdk photo-station-virtual-lite\n");
    Ok(())
}

#[test]
fn e2e_circular_dependency_reports_chain() -> Result<()> {
    let tree = TestTree::new()?
        .depends("alpha", "[BuildDependent]\nbeta\n")?
        .depends("beta", "[BuildDependent]\ngamma\n")?
        .depends("gamma", "[BuildDependent]\nalpha\n")?;

    let err = tree
        .run(Commands::Order {
            depth: Some(0),
            target: target(&[], &["alpha"]),
        })
        .unwrap_err();

    match err.downcast_ref::<DependsError>() {
        Some(DependsError::CircularDependency { chain }) => {
            assert_eq!(chain, &["alpha", "beta", "gamma", "alpha"]);
        }
        other => panic!("expected circular dependency, got {other:?}"),
    }
    Ok(())
}

#[test]
fn e2e_unknown_kernel_platform_fails() -> Result<()> {
    let tree = TestTree::with_packages()?;

    let err = tree
        .run(Commands::Order {
            depth: Some(0),
            target: target(&["ppc"], &["synosdk"]),
        })
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DependsError>(),
        Some(DependsError::KernelNotFound { platform }) if platform == "ppc"
    ));
    Ok(())
}
