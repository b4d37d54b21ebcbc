//! Test utilities and mocks for slipway unit tests.
//!
//! This module provides canned toolchain probes plus on-disk fake
//! compiler scripts for tests that exercise the real probe and the CLI.
//!
//! # Example
//!
//! ```rust,ignore
//! use slipway::test_support::{working_gnu_toolchain, CannedProbe};
//!
//! #[test]
//! fn test_example() {
//!     let probe = CannedProbe::new(working_gnu_toolchain());
//!     // Drive a resolver with the canned signals...
//! }
//! ```

pub mod fixtures;

use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;

use crate::configure::context::ConfigureContext;
use crate::configure::probe::{FortranToolchain, ToolchainProbe};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Probe returning a canned toolchain, for driving the resolvers
/// without a real compiler on the host.
#[derive(Debug, Clone)]
pub struct CannedProbe {
    toolchain: FortranToolchain,
}

impl CannedProbe {
    pub fn new(toolchain: FortranToolchain) -> Self {
        CannedProbe { toolchain }
    }
}

impl ToolchainProbe for CannedProbe {
    fn probe(&self, _ctx: &ConfigureContext) -> FortranToolchain {
        self.toolchain.clone()
    }
}

/// Probe that fails the test if it is ever consulted.
#[derive(Debug, Clone, Copy)]
pub struct UnreachableProbe;

impl ToolchainProbe for UnreachableProbe {
    fn probe(&self, _ctx: &ConfigureContext) -> FortranToolchain {
        panic!("probe must not run");
    }
}

/// Write a fake Fortran compiler script that reports `banner` for
/// `--version` and succeeds at compiling by touching the `-o` output.
#[cfg(unix)]
pub fn fake_fortran_compiler(dir: &Path, banner: &str) -> PathBuf {
    write_script(
        dir,
        "fake-fc",
        &format!(
            r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "{banner}"
    exit 0
fi
out=""
prev=""
for arg in "$@"; do
    if [ "$prev" = "-o" ]; then
        out="$arg"
    fi
    prev="$arg"
done
if [ -n "$out" ]; then
    : > "$out"
fi
exit 0
"#
        ),
    )
}

/// Write a fake compiler that identifies itself but fails every
/// compilation with an error on stderr.
#[cfg(unix)]
pub fn broken_fortran_compiler(dir: &Path, banner: &str) -> PathBuf {
    write_script(
        dir,
        "broken-fc",
        &format!(
            r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "{banner}"
    exit 0
fi
echo "internal compiler error" >&2
exit 1
"#
        ),
    )
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write script");
    let mut perms = std::fs::metadata(&path)
        .expect("failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("failed to chmod script");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configure::context::{EnvFlags, FortranSettings};

    #[test]
    fn test_canned_probe_returns_fixture() {
        let probe = CannedProbe::new(working_gnu_toolchain());
        let ctx = ConfigureContext::new("build", FortranSettings::new(), EnvFlags::default());

        let toolchain = probe.probe(&ctx);
        assert_eq!(toolchain, working_gnu_toolchain());
    }

    #[cfg(unix)]
    #[test]
    fn test_fake_compiler_script() {
        use crate::util::process::ProcessBuilder;

        let tmp = tempfile::TempDir::new().unwrap();
        let fc = fake_fortran_compiler(tmp.path(), banners::GNU);

        let output = ProcessBuilder::new(&fc).arg("--version").exec().unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("GNU Fortran"));

        let source = tmp.path().join("hello.f90");
        std::fs::write(&source, "program hello\nend program hello\n").unwrap();
        let exe = tmp.path().join("hello");

        let output = ProcessBuilder::new(&fc)
            .arg("-o")
            .arg(&exe)
            .arg(&source)
            .exec()
            .unwrap();
        assert!(output.status.success());
        assert!(exe.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_compiler_script() {
        use crate::util::process::ProcessBuilder;

        let tmp = tempfile::TempDir::new().unwrap();
        let fc = broken_fortran_compiler(tmp.path(), banners::GNU);

        let output = ProcessBuilder::new(&fc).arg("--version").exec().unwrap();
        assert!(output.status.success());

        let output = ProcessBuilder::new(&fc).arg("whatever.f90").exec().unwrap();
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("internal compiler error"));
    }
}
