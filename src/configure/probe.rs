//! Fortran toolchain probing.
//!
//! The probe produces the host signals the resolvers consume: where the
//! compiler is, what identity it reports, and whether it can compile a
//! trivial program. The probe itself never aborts; failures degrade to
//! an absent identity or a false works signal, which the toggle
//! resolver turns into its fatal checks.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::configure::context::ConfigureContext;
use crate::core::compiler::CompilerIdentity;
use crate::util::process::{find_executable, find_fortran_compiler, ProcessBuilder};

/// Signals describing the probed Fortran toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FortranToolchain {
    /// Resolved compiler path, if one was found.
    pub compiler: Option<PathBuf>,

    /// Identity reported by the compiler banner, if recognized.
    pub identity: Option<CompilerIdentity>,

    /// Whether the works-check compile succeeded.
    pub works: bool,

    /// Diagnostic output captured from a failed works-check.
    pub works_detail: Option<String>,
}

impl FortranToolchain {
    /// Toolchain with a verified compiler.
    pub fn working(compiler: impl Into<PathBuf>, identity: CompilerIdentity) -> Self {
        FortranToolchain {
            compiler: Some(compiler.into()),
            identity: Some(identity),
            works: true,
            works_detail: None,
        }
    }
}

/// Source of toolchain signals for a configuration run.
///
/// The real implementation shells out to the compiler; tests substitute
/// canned signals.
pub trait ToolchainProbe {
    fn probe(&self, ctx: &ConfigureContext) -> FortranToolchain;
}

/// Probe that runs the real compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerProbe;

impl ToolchainProbe for CompilerProbe {
    fn probe(&self, ctx: &ConfigureContext) -> FortranToolchain {
        let Some(compiler) = discover_compiler(&ctx.settings.compiler) else {
            tracing::debug!("no Fortran compiler found");
            return FortranToolchain::default();
        };

        tracing::debug!("probing Fortran compiler: {}", compiler.display());
        let identity = detect_identity(&compiler);

        // A compiler without an identity fails configuration before the
        // works signal is ever consulted; skip the extra compile.
        let (works, works_detail) = match identity {
            Some(_) => check_works(&compiler),
            None => (false, None),
        };

        FortranToolchain {
            compiler: Some(compiler),
            identity,
            works,
            works_detail,
        }
    }
}

/// Resolve the compiler path.
///
/// An explicit choice (CLI, `FC`, or config) is honored or reported
/// missing; only when nothing was chosen does discovery fall through to
/// the `FC` variable and the conventional PATH candidates.
pub(crate) fn discover_compiler(explicit: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(fc) = explicit {
        if fc.exists() {
            return Some(fc.clone());
        }
        // The choice may be a bare name like `gfortran-13`
        if let Some(found) = find_executable(&fc.to_string_lossy()) {
            return Some(found);
        }
        tracing::warn!("Configured Fortran compiler not found: {}", fc.display());
        return None;
    }

    find_fortran_compiler()
}

/// Ask the compiler for its version banner and parse an identity.
pub(crate) fn detect_identity(compiler: &Path) -> Option<CompilerIdentity> {
    let output = ProcessBuilder::new(compiler).arg("--version").exec().ok()?;
    if !output.status.success() {
        return None;
    }

    let banner = String::from_utf8_lossy(&output.stdout);
    parse_banner(&banner)
}

/// Parse a `--version` banner into a compiler identity.
///
/// Unrecognized banners yield `None`; the identity id strings follow
/// the conventional generator spellings (`GNU`, `IntelLLVM`, ...).
pub fn parse_banner(banner: &str) -> Option<CompilerIdentity> {
    let id = if banner.contains("GNU Fortran") {
        "GNU"
    } else if banner.contains("ifx") {
        "IntelLLVM"
    } else if banner.contains("ifort") {
        "Intel"
    } else if banner.contains("flang") || banner.contains("Flang") {
        "Flang"
    } else if banner.contains("NAG Fortran") {
        "NAG"
    } else if banner.contains("Cray Fortran") {
        "Cray"
    } else {
        return None;
    };

    // Banners decorate versions unpredictably ("7.1(Hanzomon)",
    // "13.2.0-4ubuntu3"); take the first major.minor pair.
    let re = Regex::new(r"(\d+)\.(\d+)").unwrap();
    let version = re
        .captures(banner)
        .map(|c| format!("{}.{}", &c[1], &c[2]))
        .unwrap_or_else(|| "unknown".to_string());

    Some(CompilerIdentity::new(id, &version))
}

/// Compile a trivial program to verify the compiler actually works.
pub(crate) fn check_works(compiler: &Path) -> (bool, Option<String>) {
    let scratch = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => return (false, Some(format!("failed to create scratch directory: {}", e))),
    };

    let source = scratch.path().join("conftest.f90");
    if let Err(e) = std::fs::write(&source, "program conftest\nend program conftest\n") {
        return (false, Some(format!("failed to write test program: {}", e)));
    }

    let exe = if cfg!(windows) { "conftest.exe" } else { "conftest" };
    let out_path = scratch.path().join(exe);

    match ProcessBuilder::new(compiler)
        .arg("-o")
        .arg(&out_path)
        .arg(&source)
        .cwd(scratch.path())
        .exec()
    {
        Ok(output) if output.status.success() => (true, None),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() { None } else { Some(stderr) };
            (false, detail)
        }
        Err(e) => (false, Some(format!("{:#}", e))),
    }
}
