//! Line-oriented scanner for dependency config files
//!
//! The format is a small INI dialect:
//!
//! ```text
//! # comment
//! [variables]
//! KernelProjs = "linux-3.10 linux-4.4"   # trailing comment
//!
//! [BuildDependent:armv7,x64]
//! libfoo
//! ```
//!
//! Scanning never fails on its own. Whether a line inside a section must be a
//! `key = "v1 v2"` pair depends on the section kind, so key/value validation
//! happens when a section's entries are interpreted.

use super::error::DependsError;
use std::path::{Path, PathBuf};

/// Every section kind understood by the loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Variables,
    Dependency,
    Kernel,
    Build,
    BuildTag,
    Reference,
    ReferenceTag,
    Packaging,
    PackagingTag,
    Bug,
}

impl SectionKind {
    /// Sections of the base `project.depends` file
    pub const BASE: [SectionKind; 3] = [Self::Variables, Self::Dependency, Self::Kernel];

    /// Sections of a per-project `SynoBuildConf/depends` file
    pub const OVERRIDE: [SectionKind; 7] = [
        Self::Build,
        Self::BuildTag,
        Self::Reference,
        Self::ReferenceTag,
        Self::Packaging,
        Self::PackagingTag,
        Self::Bug,
    ];

    /// Header text as it appears between the brackets
    pub fn name(self) -> &'static str {
        match self {
            Self::Variables => "variables",
            Self::Dependency => "project dependency",
            Self::Kernel => "platform kernel",
            Self::Build => "BuildDependent",
            Self::BuildTag => "BuildDependent-Tag",
            Self::Reference => "ReferenceOnly",
            Self::ReferenceTag => "ReferenceOnly-Tag",
            Self::Packaging => "PackagePacking",
            Self::PackagingTag => "PackagePacking-Tag",
            Self::Bug => "BuildDependent-Bug",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::BASE
            .into_iter()
            .chain(Self::OVERRIDE)
            .find(|kind| kind.name() == name)
    }

    /// Whether entries of this section are `key = "..."` pairs rather than bare names
    pub fn is_key_value(self) -> bool {
        matches!(
            self,
            Self::Variables | Self::Dependency | Self::Kernel | Self::Bug
        )
    }
}

/// A section header, split into its kind name and optional platform tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Full text between the brackets, e.g. `BuildDependent:armv7,x64`
    pub raw: String,
    /// Text before the first `:`
    pub name: String,
    /// Comma-separated platforms after the `:`, if any
    pub tags: Option<Vec<String>>,
}

impl SectionHeader {
    pub fn parse(line: &str) -> Option<Self> {
        let raw = line.strip_prefix('[')?.strip_suffix(']')?;
        let (name, tags) = match raw.split_once(':') {
            Some((name, tags)) => (
                name,
                Some(tags.split(',').map(|t| t.trim().to_string()).collect()),
            ),
            None => (raw, None),
        };
        Some(Self {
            raw: raw.to_string(),
            name: name.trim().to_string(),
            tags,
        })
    }

    /// A tagged header applies to `platform` only if it is literally listed
    pub fn lists_platform(&self, platform: &str) -> bool {
        !platform.is_empty()
            && self
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|t| t == platform))
    }
}

/// A non-blank, non-comment line with its 1-based position in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub line_no: usize,
    pub text: String,
}

/// A section and the logical lines that follow it
#[derive(Debug, Clone)]
pub struct RawSection {
    pub header: SectionHeader,
    pub lines: Vec<LogicalLine>,
}

/// A scanned config file
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    path: PathBuf,
    sections: Vec<RawSection>,
}

impl ConfigDocument {
    /// Scan config text. Lines before the first section header are dropped.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let mut sections: Vec<RawSection> = Vec::new();

        for line in logical_lines(text) {
            if let Some(header) = SectionHeader::parse(&line.text) {
                sections.push(RawSection {
                    header,
                    lines: Vec::new(),
                });
            } else if let Some(section) = sections.last_mut() {
                section.lines.push(line);
            }
        }

        Self {
            path: path.into(),
            sections,
        }
    }

    pub fn read(path: &Path) -> Result<Self, DependsError> {
        let text = std::fs::read_to_string(path).map_err(|e| DependsError::io(path, e))?;
        Ok(Self::parse(path, &text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sections(&self) -> &[RawSection] {
        &self.sections
    }

    /// Header text selected for `kind` when loading for `platform`.
    ///
    /// The first `[Kind:tags]` header listing the platform wins; otherwise the
    /// untagged `[Kind]` applies.
    pub fn select_header(&self, kind: SectionKind, platform: &str) -> String {
        self.sections
            .iter()
            .map(|s| &s.header)
            .find(|h| h.name == kind.name() && h.lists_platform(platform))
            .map(|h| h.raw.clone())
            .unwrap_or_else(|| kind.name().to_string())
    }

    /// All sections whose full header text is exactly `raw`
    pub fn sections_named<'a>(&'a self, raw: &'a str) -> impl Iterator<Item = &'a RawSection> {
        self.sections.iter().filter(move |s| s.header.raw == raw)
    }

    /// Interpret every line of a section as a key/value pair.
    ///
    /// Entries whose value list is empty are returned with an empty vector;
    /// callers decide whether that means "skip" or "delete".
    pub fn key_values(
        &self,
        section: &RawSection,
    ) -> Result<Vec<(String, Vec<String>)>, DependsError> {
        section
            .lines
            .iter()
            .map(|line| {
                parse_key_value(&line.text).ok_or_else(|| DependsError::Syntax {
                    path: self.path.clone(),
                    line_no: line.line_no,
                    line: line.text.clone(),
                })
            })
            .collect()
    }
}

/// Trim, drop blank and `#` lines, and strip trailing comments
pub fn logical_lines(text: &str) -> impl Iterator<Item = LogicalLine> + '_ {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        let text = match trimmed.find('#') {
            Some(pos) => trimmed[..pos].trim_end(),
            None => trimmed,
        };
        Some(LogicalLine {
            line_no: idx + 1,
            text: text.to_string(),
        })
    })
}

/// Parse `key = "v1 v2 ..."`.
///
/// Returns `None` when the key is empty or the first non-blank character
/// after `=` is not a double quote. A missing closing quote takes the rest of
/// the line.
pub fn parse_key_value(line: &str) -> Option<(String, Vec<String>)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    let quoted = rest.trim_start().strip_prefix('"')?;
    if key.is_empty() {
        return None;
    }
    let value = quoted.split('"').next().unwrap_or_default();
    let values = value.split_whitespace().map(str::to_string).collect();
    Some((key.to_string(), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("parser.test.rs");
}
