//! Application configuration management
//!
//! Precedence: defaults -> .env -> env vars -> CLI args.

use crate::depends::SourceTree;
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "1"; // Warnings and errors
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        1
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorChoice {
        ColorChoice::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Source tree root holding `pkgscripts/` and `source/`
    #[arg(short = 'C', long, env = "PROJDEPS_ROOT", global = true)]
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Base dependency config (default: <root>/pkgscripts/include/project.depends)
    #[arg(long, env = "PROJDEPS_DEPENDS_FILE", global = true)]
    #[serde(default)]
    pub depends_file: Option<PathBuf>,

    /// Shell config declaring BuiltinProjects (default: <root>/pkgscripts/include/env.config)
    #[arg(long, env = "PROJDEPS_ENV_CONFIG", global = true)]
    #[serde(default)]
    pub env_config: Option<PathBuf>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "PROJDEPS_LOG_LEVEL", default_value = defaults::LOG_LEVEL, global = true)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, pretty)
    #[arg(long, env = "PROJDEPS_LOG_FORMAT", default_value = defaults::LOG_FORMAT, global = true)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "PROJDEPS_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT, global = true)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, env = "PROJDEPS_COLOR", default_value = defaults::COLOR, global = true)]
    #[serde(default = "default_fns::color")]
    pub color: ColorChoice,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: None,
            depends_file: None,
            env_config: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    pub fn to_logger_config(&self, is_terminal: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.color.use_ansi(is_terminal),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.depends_file.is_some() {
            self.depends_file = other.depends_file;
        }
        if other.env_config.is_some() {
            self.env_config = other.env_config;
        }

        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.log_format != default_fns::log_format() {
            self.log_format = other.log_format;
        }
        if other.log_output != default_fns::log_output() {
            self.log_output = other.log_output;
        }
        if other.color != default_fns::color() {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration, resolving the source tree root
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        match &self.root {
            Some(root) if !root.is_dir() => {
                return Err(ConfigError::InvalidRoot {
                    path: root.display().to_string(),
                });
            }
            Some(_) => {}
            None => self.root = Some(std::env::current_dir()?),
        }
        Ok(())
    }

    pub fn source_tree(&self) -> SourceTree {
        SourceTree::new(self.root.clone().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn depends_file_path(&self) -> PathBuf {
        self.depends_file
            .clone()
            .unwrap_or_else(|| self.source_tree().base_config())
    }

    pub fn env_config_path(&self) -> PathBuf {
        self.env_config
            .clone()
            .unwrap_or_else(|| self.source_tree().env_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("config.test.rs");
}
