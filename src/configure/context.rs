//! Inputs to a configuration run.
//!
//! `FortranSettings` holds the effective configuration inputs after the
//! layered config files and command-line overrides have been merged.
//! `EnvFlags` snapshots the relevant environment variables once, at the
//! start of a run, so resolution stays deterministic and unit tests can
//! construct arbitrary environments without touching the process env.

use std::path::{Path, PathBuf};

use crate::util::config::Config;

/// Effective Fortran configuration inputs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortranSettings {
    /// Whether Fortran support is enabled. Defaults to true.
    pub enabled: bool,

    /// Extra flags appended to the general flag string.
    pub extra_fcflags: Option<String>,

    /// Explicit compiler choice (CLI `--fc`, `FC`, or config `fc`).
    pub compiler: Option<PathBuf>,
}

impl Default for FortranSettings {
    fn default() -> Self {
        FortranSettings {
            enabled: true,
            extra_fcflags: None,
            compiler: None,
        }
    }
}

impl FortranSettings {
    pub fn new() -> Self {
        FortranSettings::default()
    }

    /// Build settings from a merged config file.
    pub fn from_config(config: &Config) -> Self {
        FortranSettings {
            enabled: config.fortran.enabled.unwrap_or(true),
            extra_fcflags: config.fortran.extra_fcflags.clone(),
            compiler: config.fortran.fc.clone(),
        }
    }

    /// Override the enable flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override the extra flags.
    pub fn with_extra_fcflags(mut self, flags: impl Into<String>) -> Self {
        self.extra_fcflags = Some(flags.into());
        self
    }

    /// Override the compiler path.
    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = Some(compiler.into());
        self
    }
}

/// Snapshot of environment variables consumed by resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFlags {
    /// FCFLAGS: full override of the general flag string.
    pub fcflags: Option<String>,

    /// FC: compiler selection (reported in toolchain output).
    pub fc: Option<String>,
}

impl EnvFlags {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        EnvFlags {
            fcflags: std::env::var("FCFLAGS").ok().filter(|s| !s.is_empty()),
            fc: std::env::var("FC").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Construct a snapshot with only FCFLAGS set.
    pub fn with_fcflags(flags: impl Into<String>) -> Self {
        EnvFlags {
            fcflags: Some(flags.into()),
            fc: None,
        }
    }
}

/// Everything a configuration run needs to resolve Fortran support.
#[derive(Debug, Clone)]
pub struct ConfigureContext {
    /// Binary output directory for the build being configured.
    pub build_dir: PathBuf,

    /// Effective settings (config files merged with CLI overrides).
    pub settings: FortranSettings,

    /// Environment snapshot.
    pub env: EnvFlags,
}

impl ConfigureContext {
    pub fn new(build_dir: impl Into<PathBuf>, settings: FortranSettings, env: EnvFlags) -> Self {
        ConfigureContext {
            build_dir: build_dir.into(),
            settings,
            env,
        }
    }

    /// Module output directory: `<build_dir>/include/fortran`.
    pub fn module_dir(&self) -> PathBuf {
        self.build_dir.join("include").join("fortran")
    }

    /// Path of the persisted resolution: `<build_dir>/fortran.toml`.
    pub fn resolved_path(&self) -> PathBuf {
        self.build_dir.join("fortran.toml")
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }
}
