//! Temporary source tree fixture
//!
//! Lays out `pkgscripts/include` and `source/<project>/SynoBuildConf` the
//! same way a real checkout does. The directory is removed on drop.

use crate::depends::{SourceTree, split_virtual};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary source tree with automatic cleanup
pub struct SourceTreeFixture {
    pub temp_dir: TempDir,
}

impl SourceTreeFixture {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn tree(&self) -> SourceTree {
        SourceTree::new(self.path())
    }

    /// Write `content` to a path relative to the tree root, creating parents
    pub fn write_file(&self, relative: &str, content: &str) -> io::Result<PathBuf> {
        let full_path = self.path().join(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Write `pkgscripts/include/project.depends`
    pub fn with_base_config(self, content: &str) -> io::Result<Self> {
        self.write_file("pkgscripts/include/project.depends", content)?;
        Ok(self)
    }

    /// Write the project's override file; virtual names get a suffixed file
    pub fn with_depends(self, project: &str, content: &str) -> io::Result<Self> {
        let (real, suffix) = split_virtual(project);
        self.write_file(
            &format!("source/{real}/SynoBuildConf/depends{suffix}"),
            content,
        )?;
        Ok(self)
    }

    /// Create a project directory without any override file
    pub fn with_project(self, project: &str) -> io::Result<Self> {
        fs::create_dir_all(self.path().join("source").join(project))?;
        Ok(self)
    }

    /// Write `pkgscripts/include/env.config` declaring the builtin projects
    pub fn with_builtin_projects(self, projects: &[&str]) -> io::Result<Self> {
        let content = format!(
            "#!/bin/bash\nexport LANG=C\nBuiltinProjects=\"{}\"\n",
            projects.join(" ")
        );
        self.write_file("pkgscripts/include/env.config", &content)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
