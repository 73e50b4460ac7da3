//! Error taxonomy for dependency resolution
//!
//! Every variant is fatal to the invocation that raised it. Warning-level
//! conditions never surface here; they are logged and traversal continues.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, normalizing, or traversing dependencies
#[derive(Debug, Error)]
pub enum DependsError {
    #[error("Line '{line}' is not a legal key-value pair ({path}:{line_no})")]
    Syntax {
        path: PathBuf,
        line_no: usize,
        line: String,
    },

    #[error("Fail to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Circular dependency: {}", chain.join("->"))]
    CircularDependency { chain: Vec<String> },

    #[error("Conflict at {{{}}}", projects.join(","))]
    Conflict { projects: Vec<String> },

    #[error("Kernel project not specified for platform '{platform}'")]
    KernelNotFound { platform: String },

    #[error("Variable '{variable}' renames project key to multiple names: {}", expansion.join(" "))]
    AmbiguousRename {
        variable: String,
        expansion: Vec<String>,
    },

    #[error("Variable '{variable}' keeps expanding into itself")]
    RecursiveVariable { variable: String },

    #[error("Traverse hook failed: {source}")]
    Hook { source: anyhow::Error },
}

/// Broad classification of a [`DependsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Io,
    Dependency,
    Hook,
}

impl DependsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Io { .. } => ErrorKind::Io,
            Self::CircularDependency { .. }
            | Self::Conflict { .. }
            | Self::KernelNotFound { .. }
            | Self::AmbiguousRename { .. }
            | Self::RecursiveVariable { .. } => ErrorKind::Dependency,
            Self::Hook { .. } => ErrorKind::Hook,
        }
    }

    /// Process exit code, compatible with the historical build scripts
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Syntax | ErrorKind::Io => 4,
            ErrorKind::Dependency => 5,
            ErrorKind::Hook => 6,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
