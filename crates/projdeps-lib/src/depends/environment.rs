//! Build environment collaborators for layered traversal
//!
//! The base target (which stabilized environment a platform builds against)
//! and the builtin project set both come from outside the dependency graph.
//! They are injected through [`BaseTargetResolver`] and
//! [`BuiltinProjectSource`] so traversal can run without a real checkout.

use super::error::DependsError;
use super::parser::{ConfigDocument, logical_lines, parse_key_value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Section holding a project's base environment unless another is requested
pub const DEFAULT_ENV_SECTION: &str = "default";

/// Environment key applying to every platform without its own entry
pub const ALL_PLATFORMS: &str = "all";

/// Version used when a project carries no environment config at all
pub const UNKNOWN_VERSION: &str = "unknown";

const BUILTIN_PROJECTS_KEY: &str = "BuiltinProjects";

/// Resolves the base target string a platform builds against
pub trait BaseTargetResolver {
    fn resolve_base_target(&self, platform: &str) -> String;
}

/// Supplies the projects belonging to the fixed platform baseline
pub trait BuiltinProjectSource {
    fn builtin_projects(&self) -> Result<BTreeSet<String>, DependsError>;
}

impl BuiltinProjectSource for BTreeSet<String> {
    fn builtin_projects(&self) -> Result<BTreeSet<String>, DependsError> {
        Ok(self.clone())
    }
}

/// Platform -> environment version, with `all` as the catch-all key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEnvironment {
    versions: BTreeMap<String, String>,
}

impl BaseEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every platform builds against `version`
    pub fn fixed(version: impl Into<String>) -> Self {
        let mut env = Self::new();
        env.set(ALL_PLATFORMS, version);
        env
    }

    pub fn set(&mut self, platform: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(platform.into(), version.into());
    }

    pub fn get(&self, platform: &str) -> Option<&str> {
        self.versions.get(platform).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Read the environment section of a project's override file.
    ///
    /// A missing or unreadable file means the project is not a normal one:
    /// every platform gets `unknown`. Malformed lines inside the selected
    /// section are syntax errors.
    pub fn load(path: Option<&Path>, section: Option<&str>) -> Result<Self, DependsError> {
        let section = section.unwrap_or(DEFAULT_ENV_SECTION);
        let Some(path) = path else {
            info!("No override file found, assuming not a normal project");
            return Ok(Self::fixed(UNKNOWN_VERSION));
        };

        let doc = match ConfigDocument::read(path) {
            Ok(doc) => doc,
            Err(err) => {
                info!("{}. Assume not a normal project.", err);
                return Ok(Self::fixed(UNKNOWN_VERSION));
            }
        };
        Self::from_document(&doc, section)
    }

    pub fn from_document(doc: &ConfigDocument, section: &str) -> Result<Self, DependsError> {
        let mut env = Self::new();
        for raw in doc.sections_named(section) {
            for (platform, values) in doc.key_values(raw)? {
                if let Some(version) = values.into_iter().next() {
                    env.set(platform, version);
                }
            }
        }
        info!("Use environment settings in [{}]", section);
        Ok(env)
    }
}

impl BaseTargetResolver for BaseEnvironment {
    fn resolve_base_target(&self, platform: &str) -> String {
        match self.get(platform).or_else(|| self.get(ALL_PLATFORMS)) {
            Some(version) => version.to_string(),
            None => {
                warn!("Base environment not specified for {}", platform);
                String::new()
            }
        }
    }
}

/// Builtin projects declared by the `BuiltinProjects` assignment in
/// `env.config`
#[derive(Debug, Clone)]
pub struct EnvConfigBuiltins {
    path: PathBuf,
}

impl EnvConfigBuiltins {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BuiltinProjectSource for EnvConfigBuiltins {
    fn builtin_projects(&self) -> Result<BTreeSet<String>, DependsError> {
        if !self.path.is_file() {
            warn!("No builtin project list at {}", self.path.display());
            return Ok(BTreeSet::new());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|e| DependsError::io(&self.path, e))?;

        // Shell file: only the last plain assignment is honoured
        let mut projects = BTreeSet::new();
        for line in logical_lines(&text) {
            let assignment = line.text.strip_prefix("export ").unwrap_or(&line.text).trim();
            let Some(rest) = assignment
                .strip_prefix(BUILTIN_PROJECTS_KEY)
                .and_then(|r| r.trim_start().strip_prefix('='))
            else {
                continue;
            };
            projects = match parse_key_value(assignment) {
                Some((_, values)) => values.into_iter().collect(),
                None => rest.split_whitespace().map(str::to_string).collect(),
            };
        }

        debug!(count = projects.len(), "Loaded builtin projects from {}", self.path.display());
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("environment.test.rs");
}
