//! # projdeps Library
//!
//! Project dependency resolution for multi-project source trees.
//!
//! ## Core Modules
//!
//! - [`depends`] - Config parsing, graph assembly and the three traversals
//! - [`primitives`] - Shared configuration types and errors
//! - [`logger`] - Structured logging setup
//! - [`application`] - CLI interface, configuration and command dispatch
//!
//! ## Quick Start
//!
//! ```no_run
//! use projdeps_lib::depends::{GraphStore, SourceTree, forward};
//!
//! let tree = SourceTree::new("/path/to/tree");
//! let store = GraphStore::load(&tree, &tree.base_config(), "").unwrap();
//! let order = forward::traverse(&["app".to_string()], &store.graph, 0).unwrap();
//! println!("{}", order.join(" "));
//! ```

pub mod application;
pub mod depends;
pub mod logger;
pub mod primitives;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use application::{AppConfig, Cli, Commands, execute_command};
pub use depends::{DependencyGraph, DependsError, GraphStore, SourceTree};
pub use logger::Logger;
pub use primitives::{ColorChoice, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};

use anyhow::Result;
use application::CliConfig;
use std::io::IsTerminal;

/// Exit code when no more specific one applies
pub const EXIT_OTHER: u8 = 6;

/// Parse arguments, initialize logging and run the selected command
pub fn main() -> Result<()> {
    let config = CliConfig::load_resolved()?;

    let is_terminal = match config.app_config.log_output {
        LogOutput::Stderr => std::io::stderr().is_terminal(),
        LogOutput::Stdout => std::io::stdout().is_terminal(),
    };
    Logger::init(config.app_config.to_logger_config(is_terminal))?;

    execute_command(config)
}

/// Process exit code for an error returned by [`main`]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| {
            if let Some(depends) = cause.downcast_ref::<DependsError>() {
                Some(depends.exit_code())
            } else {
                cause.downcast_ref::<ConfigError>().map(ConfigError::exit_code)
            }
        })
        .unwrap_or(EXIT_OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_follows_error_kind() {
        let cycle = anyhow::Error::new(DependsError::CircularDependency {
            chain: vec!["A".into(), "B".into(), "A".into()],
        });
        assert_eq!(exit_code(&cycle), 5);

        let config = anyhow::Error::new(ConfigError::InvalidRoot { path: "/x".into() });
        assert_eq!(exit_code(&config), 3);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), EXIT_OTHER);
    }

    #[test]
    fn test_exit_code_sees_through_context() {
        let err = anyhow::Error::new(DependsError::KernelNotFound {
            platform: "ppc".into(),
        })
        .context("Failed to order projects");
        assert_eq!(exit_code(&err), 5);
    }
}
