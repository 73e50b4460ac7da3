use crate::primitives::ConfigError;
use clap::{Args, Parser, Subcommand};

use super::config::AppConfig;

/// projdeps - project dependency resolution for source trees
#[derive(Debug, Clone, Parser)]
#[command(name = "projdeps")]
#[command(about = "Re-order, expand and walk project dependencies of a source tree")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Parse the process arguments.
    ///
    /// `--help` and `--version` print and exit; any other parse failure is
    /// returned as [`ConfigError::InvalidArguments`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::try_from_args(std::env::args_os())
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(err) if !err.use_stderr() => err.exit(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            app_config: cli.config,
            command: cli.command,
        })
    }
}

/// Projects to resolve, optionally restricted to platforms
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Platforms; repeat the flag or separate with spaces
    #[arg(short, long = "platform", value_name = "PLATFORM", value_delimiter = ' ')]
    pub platforms: Vec<String>,

    /// Projects to resolve
    #[arg(required = true, value_name = "PROJECT")]
    pub projects: Vec<String>,
}

impl TargetArgs {
    /// Platform used to select tagged override sections.
    ///
    /// Only an unambiguous single platform selects tagged sections.
    pub fn section_platform(&self) -> &str {
        match self.platforms.as_slice() {
            [platform] => platform,
            _ => "",
        }
    }
}

/// Available projdeps commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print projects in build order
    ///
    /// Without --depth only the given projects are re-ordered. With --depth
    /// their dependencies are included up to that level (0 = no limit).
    Order {
        /// Dependency levels to include (itself is level 0; 0 = no limit)
        #[arg(short = 'x', long = "depth", value_name = "LEVEL")]
        depth: Option<usize>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Expand projects to everything depending on them
    Rdepends {
        /// Reverse dependency levels to include (0 = no limit)
        #[arg(short = 'r', long = "depth", value_name = "LEVEL", default_value_t = 0)]
        depth: usize,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Walk the projects needed to build, layer by layer
    Source {
        /// Platform to resolve for
        #[arg(short, long, value_name = "PLATFORM")]
        platform: String,

        /// Also resolve projects taken from the base environment
        #[arg(long)]
        base: bool,

        /// Base environment version for every platform
        #[arg(long, value_name = "VERSION")]
        base_version: Option<String>,

        /// Section of the first project's override file holding its environment
        #[arg(long, value_name = "SECTION")]
        env_section: Option<String>,

        /// Report layers as JSON lines
        #[arg(long)]
        json: bool,

        /// Projects to build
        #[arg(required = true, value_name = "PROJECT")]
        projects: Vec<String>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Order { .. } => "order",
            Commands::Rdepends { .. } => "rdepends",
            Commands::Source { .. } => "source",
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("cli.test.rs");
}
