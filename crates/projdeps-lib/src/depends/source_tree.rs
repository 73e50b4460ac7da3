//! Source tree layout
//!
//! ```text
//! <root>/pkgscripts/include/project.depends      base config
//! <root>/pkgscripts/include/env.config           builtin project list
//! <root>/source/<project>/SynoBuildConf/depends  per-project override
//! <root>/source/<project>/SynoBuildConf/depends-virtual-<suffix>
//! ```

use super::error::DependsError;
use super::{VIRTUAL_PROJ_SEP, split_virtual};
use std::path::{Path, PathBuf};
use tracing::trace;

const DEPENDS_FILE: &str = "depends";
const BUILD_CONF_DIR: &str = "SynoBuildConf";

/// Looks up the override file governing a project
pub trait DependsFileLocator {
    /// Path of the project's override file, or `None` if it has none
    fn depends_file(&self, project: &str) -> Option<PathBuf>;
}

/// A checked-out source tree on disk
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join("source")
    }

    pub fn base_config(&self) -> PathBuf {
        self.root.join("pkgscripts/include/project.depends")
    }

    pub fn env_config(&self) -> PathBuf {
        self.root.join("pkgscripts/include/env.config")
    }

    /// Override path for `project` without checking that it exists.
    ///
    /// A virtual project's suffixed file is preferred when present.
    pub fn depends_path(&self, project: &str) -> PathBuf {
        let (real, suffix) = split_virtual(project);
        let plain = self
            .source_dir()
            .join(real)
            .join(BUILD_CONF_DIR)
            .join(DEPENDS_FILE);
        if suffix.is_empty() {
            return plain;
        }

        let mut suffixed = plain.clone().into_os_string();
        suffixed.push(suffix);
        let suffixed = PathBuf::from(suffixed);
        if suffixed.is_file() { suffixed } else { plain }
    }

    /// Every override file in the tree, paired with the graph key it defines.
    ///
    /// The key is the project directory with any virtual suffix removed,
    /// followed by the file name's virtual suffix. Results are sorted by path.
    pub fn depends_files(&self) -> Result<Vec<(String, PathBuf)>, DependsError> {
        let source_dir = self.source_dir();
        if !source_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&source_dir).map_err(|e| DependsError::io(&source_dir, e))?;
        let mut found = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| DependsError::io(&source_dir, e))?;
            let conf_dir = entry.path().join(BUILD_CONF_DIR);
            let Ok(files) = std::fs::read_dir(&conf_dir) else {
                continue;
            };

            let project_dir = entry.file_name().to_string_lossy().into_owned();
            for file in files {
                let file = file.map_err(|e| DependsError::io(&conf_dir, e))?;
                let name = file.file_name().to_string_lossy().into_owned();
                if !name.starts_with(DEPENDS_FILE) || !file.path().is_file() {
                    continue;
                }
                let key = project_key(&project_dir, &name);
                trace!(project = %key, path = %file.path().display(), "Found override file");
                found.push((key, file.path()));
            }
        }

        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }
}

impl DependsFileLocator for SourceTree {
    fn depends_file(&self, project: &str) -> Option<PathBuf> {
        if super::is_variable_token(project) {
            return None;
        }
        let path = self.depends_path(project);
        path.is_file().then_some(path)
    }
}

/// Graph key for an override file in `source/<project_dir>/SynoBuildConf/<file_name>`
pub fn project_key(project_dir: &str, file_name: &str) -> String {
    let (real, _) = split_virtual(project_dir);
    match file_name.find(VIRTUAL_PROJ_SEP) {
        Some(idx) => format!("{}{}", real, &file_name[idx..]),
        None => real.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("source_tree.test.rs");
}
