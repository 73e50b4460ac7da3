//! Application layer modules
//!
//! CLI interface, configuration loading, command dispatch and the layer
//! reporter used by `projdeps source`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;
pub mod reporter;

pub use cli::{Cli, CliConfig, Commands, TargetArgs};
pub use commands::{execute_command, execute_command_with_writer};
pub use config::AppConfig;
pub use loader::*;
pub use reporter::LayerReporter;
