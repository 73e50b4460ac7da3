//! End-to-end helpers for projdeps
//!
//! [`TestTree`] lays out a realistic source tree on disk and runs commands
//! against it through the same dispatch path the binary uses.

use anyhow::Result;
use projdeps_lib::application::{AppConfig, Commands, TargetArgs, execute_command_with_writer};
use projdeps_lib::testing::SourceTreeFixture;
use std::path::Path;

/// Base config shared by the workflow tests
pub const BASE_CONFIG: &str = r#"
# Global project dependencies
[variables]
KernelProjs = "linux-3.10 linux-4.4"
CryptoLibs = "libssl libcrypto"

[project dependency]
libcrypto = "libc"
libssl = "libcrypto libc"
libcurl = "CryptoLibs libz"
libz = "libc"
webapi = "libcurl libjson"
libjson = "libc"

[platform kernel]
armv7 = "linux-3.10"
x64 = "linux-4.4"
x86 = "linux-4.4"
"#;

/// Temporary source tree plus the config pointing at it
pub struct TestTree {
    fixture: SourceTreeFixture,
}

impl TestTree {
    /// Empty tree with only the base config
    pub fn new() -> Result<Self> {
        let fixture = SourceTreeFixture::new()?.with_base_config(BASE_CONFIG)?;
        Ok(Self { fixture })
    }

    /// Tree with a couple of packaged projects carrying override files
    pub fn with_packages() -> Result<Self> {
        Self::new()?
            .depends(
                "synosdk",
                "[BuildDependent]\nwebapi\n${KernelProjs}\n\n[ReferenceOnly]\nsyno-headers\n",
            )?
            .depends(
                "photo-station",
                "[BuildDependent]\nsynosdk\nlibexif\n[BuildDependent:x64]\nsynosdk\nlibexif\nlibsimd\n\
                 [PackagePacking]\nffmpeg\n[BuildDependent-Tag]\nlibbase\n\n[default]\nall = \"6.2\"\n",
            )?
            .depends("photo-station-virtual-lite", "[BuildDependent]\nsynosdk\n")?
            .builtins(&["libc", "busybox"])
    }

    pub fn depends(self, project: &str, content: &str) -> Result<Self> {
        Ok(Self {
            fixture: self.fixture.with_depends(project, content)?,
        })
    }

    pub fn builtins(self, projects: &[&str]) -> Result<Self> {
        Ok(Self {
            fixture: self.fixture.with_builtin_projects(projects)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.fixture.path()
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            root: Some(self.path().to_path_buf()),
            ..AppConfig::default()
        }
    }

    /// Run `command` and return what it printed
    pub fn run(&self, command: Commands) -> Result<String> {
        let mut out = Vec::new();
        execute_command_with_writer(command, &self.config(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }
}

/// Build a [`TargetArgs`] from string slices
pub fn target(platforms: &[&str], projects: &[&str]) -> TargetArgs {
    TargetArgs {
        platforms: platforms.iter().map(|s| s.to_string()).collect(),
        projects: projects.iter().map(|s| s.to_string()).collect(),
    }
}

/// Split a printed project line into names
pub fn words(output: &str) -> Vec<&str> {
    output.split_whitespace().collect()
}
