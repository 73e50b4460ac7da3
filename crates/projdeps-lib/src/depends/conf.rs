//! Per-project override files (`SynoBuildConf/depends`)
//!
//! An override file declares a project's build, reference-only and packaging
//! dependencies, each split into a current-branch tier and a base-branch tier
//! (the `-Tag` sections), plus `BuildDependent-Bug` entries that replace other
//! projects' dependency lists.

use super::error::DependsError;
use super::parser::{ConfigDocument, SectionKind};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::trace;

/// Dependencies of one kind, split by tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierLists {
    /// Resolved against the current development branch
    pub curr: Vec<String>,
    /// Resolved against the stabilized base branch
    pub base: Vec<String>,
}

/// Parsed contents of one override file for one platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependsConf {
    pub build: TierLists,
    pub reference: TierLists,
    pub packaging: TierLists,
    /// project -> replacement dependency list; empty means "drop the entry"
    pub bug: BTreeMap<String, Vec<String>>,
}

impl DependsConf {
    pub fn read(path: &Path, platform: &str) -> Result<Self, DependsError> {
        let doc = ConfigDocument::read(path)?;
        Self::from_document(&doc, platform)
    }

    pub fn from_document(doc: &ConfigDocument, platform: &str) -> Result<Self, DependsError> {
        let mut conf = Self::default();

        for kind in SectionKind::OVERRIDE {
            let header = doc.select_header(kind, platform);
            for section in doc.sections_named(&header) {
                trace!(path = %doc.path().display(), section = %header, "Reading override section");
                if kind == SectionKind::Bug {
                    for (project, deps) in doc.key_values(section)? {
                        conf.bug.insert(project, deps);
                    }
                    continue;
                }

                if let Some(list) = conf.list_mut(kind) {
                    list.extend(section.lines.iter().map(|line| line.text.clone()));
                }
            }
        }

        Ok(conf)
    }

    /// A project's own build dependencies as recorded in the dependency graph
    pub fn build_dependencies(&self) -> Vec<String> {
        self.build
            .base
            .iter()
            .chain(&self.build.curr)
            .cloned()
            .collect()
    }

    fn list_mut(&mut self, kind: SectionKind) -> Option<&mut Vec<String>> {
        match kind {
            SectionKind::Build => Some(&mut self.build.curr),
            SectionKind::BuildTag => Some(&mut self.build.base),
            SectionKind::Reference => Some(&mut self.reference.curr),
            SectionKind::ReferenceTag => Some(&mut self.reference.base),
            SectionKind::Packaging => Some(&mut self.packaging.curr),
            SectionKind::PackagingTag => Some(&mut self.packaging.base),
            SectionKind::Variables
            | SectionKind::Dependency
            | SectionKind::Kernel
            | SectionKind::Bug => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("conf.test.rs");
}
