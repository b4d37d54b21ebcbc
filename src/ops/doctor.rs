//! Fortran environment health checks.
//!
//! The `doctor` command performs fast environment checks to verify
//! that a usable Fortran toolchain is available before a configure
//! pass commits to one.
//!
//! ## Usage
//!
//! ```bash
//! slipway doctor           # Quick check
//! slipway doctor --verbose # Detailed output
//! slipway doctor --json    # Machine-readable report
//! ```
//!
//! ## Checks Performed
//!
//! - Fortran compiler availability (config, `FC`, then PATH)
//! - Compiler identity (version banner recognition)
//! - Works check (trivial test compile)
//! - `FCFLAGS` override presence
//! - Config override presence

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::{Serialize, Serializer};

use crate::configure::context::{EnvFlags, FortranSettings};
use crate::configure::probe;
use crate::util::config::{load_config, Config};
use crate::util::process::{find_executable, ProcessBuilder, FORTRAN_COMPILERS};
use crate::util::GlobalContext;

/// Result of a single health check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Version string (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// How long the check took
    #[serde(rename = "duration_ms", serialize_with = "duration_ms")]
    pub duration: Duration,

    /// Whether this check is required or optional
    pub required: bool,
}

fn duration_ms<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            version: None,
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            version: None,
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the tool path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Total time taken
    #[serde(rename = "total_duration_ms", serialize_with = "duration_ms")]
    pub total_duration: Duration,

    /// Environment information
    pub environment: BTreeMap<String, String>,
}

impl DoctorReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        DoctorReport {
            checks: Vec::new(),
            total_duration: Duration::ZERO,
            environment: BTreeMap::new(),
        }
    }

    /// Add a check result.
    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Get the count of passed checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get the count of failed checks.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Get the count of required failed checks.
    pub fn required_failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .count()
    }
}

impl Default for DoctorReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for the doctor command.
#[derive(Debug, Clone, Default)]
pub struct DoctorOptions {
    /// Include verbose output
    pub verbose: bool,
}

/// Run the doctor command.
pub fn doctor(ctx: &GlobalContext, env: &EnvFlags, options: DoctorOptions) -> Result<DoctorReport> {
    let start = Instant::now();
    let mut report = DoctorReport::new();

    let config = load_config(&ctx.config_path(), &ctx.project_config_path());
    let settings = FortranSettings::from_config(&config);

    // Collect environment info
    report
        .environment
        .insert("os".to_string(), std::env::consts::OS.to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());

    if options.verbose || ctx.is_verbose() {
        for name in FORTRAN_COMPILERS {
            if let Some(path) = find_executable(name) {
                report
                    .environment
                    .insert(format!("which.{}", name), path.display().to_string());
            }
        }
    }

    // Check Fortran compiler; the identity and works checks only make
    // sense once one is found.
    let (compiler_check, compiler) = check_compiler(&settings);
    report.add(compiler_check);

    match &compiler {
        Some(path) => {
            report.add(check_identity(path));
            report.add(check_works(path));
        }
        None => {
            report.add(CheckResult::fail(
                "Compiler Identity",
                "skipped: no compiler to identify",
            ));
            report.add(CheckResult::fail(
                "Works Check",
                "skipped: no compiler to test",
            ));
        }
    }

    report.add(check_fcflags(env));
    report.add(check_config(&config));

    report.total_duration = start.elapsed();
    Ok(report)
}

/// Check for a Fortran compiler.
fn check_compiler(settings: &FortranSettings) -> (CheckResult, Option<PathBuf>) {
    let start = Instant::now();

    match probe::discover_compiler(&settings.compiler) {
        Some(path) => {
            let mut check = CheckResult::pass(
                "Fortran Compiler",
                format!("Found {}", path.display()),
            )
            .with_path(path.clone());

            if let Some(banner) = version_banner_line(&path) {
                check = check.with_version(banner);
            }

            (check.with_duration(start.elapsed()), Some(path))
        }
        None => {
            let check = CheckResult::fail(
                "Fortran Compiler",
                format!(
                    "No Fortran compiler found (tried {})",
                    FORTRAN_COMPILERS.join(", ")
                ),
            )
            .with_duration(start.elapsed());

            (check, None)
        }
    }
}

/// Check that the compiler banner is recognizable.
fn check_identity(compiler: &Path) -> CheckResult {
    let start = Instant::now();

    match probe::detect_identity(compiler) {
        Some(identity) => CheckResult::pass(
            "Compiler Identity",
            format!("Identified as {} Fortran {}", identity.id, identity.version),
        )
        .with_version(identity.version)
        .with_duration(start.elapsed()),
        None => CheckResult::fail(
            "Compiler Identity",
            "Version banner not recognized; configuration would abort",
        )
        .with_duration(start.elapsed()),
    }
}

/// Check that the compiler can compile a trivial program.
fn check_works(compiler: &Path) -> CheckResult {
    let start = Instant::now();

    match probe::check_works(compiler) {
        (true, _) => CheckResult::pass("Works Check", "Compiled a test program")
            .with_duration(start.elapsed()),
        (false, detail) => {
            let message = match detail {
                Some(detail) => format!("Test compile failed: {}", detail),
                None => "Test compile failed".to_string(),
            };
            CheckResult::fail("Works Check", message).with_duration(start.elapsed())
        }
    }
}

/// Report whether FCFLAGS overrides the computed flags.
fn check_fcflags(env: &EnvFlags) -> CheckResult {
    match &env.fcflags {
        Some(value) => CheckResult::pass(
            "FCFLAGS",
            format!("Set to '{}'; it will replace all computed flags", value),
        )
        .optional(),
        None => CheckResult::pass("FCFLAGS", "Not set; computed flags apply").optional(),
    }
}

/// Report whether config files override toolchain settings.
fn check_config(config: &Config) -> CheckResult {
    if config.has_overrides() {
        CheckResult::pass("Config", "Toolchain overrides loaded from config").optional()
    } else {
        CheckResult::pass("Config", "No config overrides").optional()
    }
}

/// First line of the compiler's `--version` output.
fn version_banner_line(compiler: &Path) -> Option<String> {
    let output = ProcessBuilder::new(compiler).arg("--version").exec().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

/// Format the doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    writeln!(output, "Slipway Doctor").unwrap();
    writeln!(output, "==============\n").unwrap();

    // Environment
    if verbose {
        writeln!(output, "Environment:").unwrap();
        writeln!(
            output,
            "  OS: {} ({})",
            report
                .environment
                .get("os")
                .unwrap_or(&"unknown".to_string()),
            report
                .environment
                .get("arch")
                .unwrap_or(&"unknown".to_string())
        )
        .unwrap();
        writeln!(output).unwrap();
    }

    // Checks
    writeln!(output, "Checks:").unwrap();
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let required = if check.required { "" } else { " (optional)" };

        writeln!(output, "  {} {}{}", status, check.name, required).unwrap();

        if verbose {
            writeln!(output, "      {}", check.message).unwrap();
            if let Some(path) = &check.path {
                writeln!(output, "      Path: {}", path.display()).unwrap();
            }
            if let Some(version) = &check.version {
                writeln!(output, "      Version: {}", version).unwrap();
            }
        }
    }

    writeln!(output).unwrap();

    // Summary
    let passed = report.passed_count();
    let failed = report.failed_count();
    let required_failed = report.required_failed_count();

    writeln!(output, "Summary: {} passed, {} failed", passed, failed).unwrap();

    if required_failed > 0 {
        writeln!(
            output,
            "\nWarning: {} required check(s) failed. Configuration would abort.",
            required_failed
        )
        .unwrap();
    } else if failed > 0 {
        writeln!(
            output,
            "\nAll required checks passed. {} optional check(s) failed.",
            failed
        )
        .unwrap();
    } else {
        writeln!(output, "\nAll checks passed. Fortran support is ready to use.").unwrap();
    }

    output
}
