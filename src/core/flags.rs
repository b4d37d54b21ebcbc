//! Flag strings and provenance for the Fortran toolchain.
//!
//! A `FlagSet` holds the three space-separated flag strings the
//! configuration pass produces: one mode-independent string plus the
//! release and debug strings. Every applied value is also recorded as a
//! `FlagEntry` so output can show which override tier supplied it.

use serde::{Deserialize, Serialize};

/// Space-separated flag strings for the mode-independent set and the
/// two build modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    /// Flags applied in every build mode
    pub general: String,

    /// Flags applied only in release mode
    pub release: String,

    /// Flags applied only in debug mode
    pub debug: String,
}

impl FlagSet {
    pub fn new() -> Self {
        FlagSet::default()
    }

    /// Append to the general flag string, joined by a single space.
    pub fn append_general(&mut self, flags: &str) {
        if self.general.is_empty() {
            self.general = flags.to_string();
        } else {
            self.general.push(' ');
            self.general.push_str(flags);
        }
    }

    /// Replace the general flag string entirely.
    pub fn set_general(&mut self, flags: &str) {
        self.general = flags.to_string();
    }

    /// Replace the release-mode flag string.
    pub fn set_release(&mut self, flags: &str) {
        self.release = flags.to_string();
    }

    /// Replace the debug-mode flag string.
    pub fn set_debug(&mut self, flags: &str) {
        self.debug = flags.to_string();
    }

    /// Effective flags for one build mode: general plus the mode string.
    pub fn effective(&self, mode: BuildMode) -> String {
        let mode_flags = match mode {
            BuildMode::Release => &self.release,
            BuildMode::Debug => &self.debug,
        };

        if self.general.is_empty() {
            mode_flags.clone()
        } else if mode_flags.is_empty() {
            self.general.clone()
        } else {
            format!("{} {}", self.general, mode_flags)
        }
    }

    /// Check whether no flags have been set at all.
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.release.is_empty() && self.debug.is_empty()
    }
}

/// Build mode for effective-flag queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Release build
    Release,
    /// Debug build (default)
    #[default]
    Debug,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Release => "release",
            BuildMode::Debug => "debug",
        }
    }
}

impl std::str::FromStr for BuildMode {
    type Err = BuildModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(BuildMode::Release),
            "debug" => Ok(BuildMode::Debug),
            _ => Err(BuildModeParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid build mode string.
#[derive(Debug, Clone)]
pub struct BuildModeParseError(pub String);

impl std::fmt::Display for BuildModeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid build mode '{}', valid values: release, debug",
            self.0
        )
    }
}

impl std::error::Error for BuildModeParseError {}

/// Which flag string a provenance entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagScope {
    General,
    Release,
    Debug,
}

impl FlagScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagScope::General => "general",
            FlagScope::Release => "release",
            FlagScope::Debug => "debug",
        }
    }
}

/// Which override tier supplied a flag value.
///
/// Tiers resolve first-match-wins: an environment value replaces
/// everything below it, extra flags append to the base string, and
/// vendor defaults fill in last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagSource {
    /// FCFLAGS environment override
    Environment,
    /// Extra flags from config or the command line
    ExtraFlags,
    /// Fixed defaults for the detected compiler vendor
    VendorDefault,
}

impl FlagSource {
    /// Short label used in provenance annotations.
    pub fn describe(&self) -> &'static str {
        match self {
            FlagSource::Environment => "FCFLAGS environment override",
            FlagSource::ExtraFlags => "extra flags",
            FlagSource::VendorDefault => "vendor default profile",
        }
    }
}

/// One applied flag value together with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEntry {
    pub scope: FlagScope,
    pub value: String,
    pub source: FlagSource,
}

impl FlagEntry {
    pub fn new(scope: FlagScope, value: impl Into<String>, source: FlagSource) -> Self {
        FlagEntry {
            scope,
            value: value.into(),
            source,
        }
    }
}
