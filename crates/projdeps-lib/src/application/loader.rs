//! Configuration loading
//!
//! Coordinates the configuration sources in precedence order.

use crate::primitives::ConfigError;
use tracing::debug;

use super::{cli::CliConfig, config::AppConfig, env::EnvironmentConfig};

/// Environment files read from the working directory, first wins
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` into the process environment.
///
/// Missing files are skipped; unreadable or malformed ones are errors.
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Resolve the final config from parsed CLI values.
    ///
    /// Defaults, then the standard color variables, then `cli` (which already
    /// carries `PROJDEPS_*` values), then validation.
    pub fn resolve(cli: AppConfig, env: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env.apply_color_config(config.color);
        config = config.merge_with(cli);
        config.validate()?;
        Ok(config)
    }
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load_resolved() -> Result<Self, ConfigError> {
        load_env_files()?;
        let env = EnvironmentConfig::load()?;
        let mut cli = Self::load()?;
        cli.app_config = AppConfig::resolve(cli.app_config, &env)?;
        Ok(cli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("loader.test.rs");
}
