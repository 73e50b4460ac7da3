//! Test fixtures for projdeps
//!
//! Builds throwaway source trees on disk so loaders and traversals can be
//! exercised end to end without a real checkout.

pub mod filesystem;

pub use filesystem::SourceTreeFixture;
